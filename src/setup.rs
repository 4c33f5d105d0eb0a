//! The stock Night City board.
//!
//! Gang and district tables are indexed in registration order; district ids
//! are the table index. Boundaries are in the 1024x1536 canonical space.

use crate::board::{
    Board, BoardConfig, BoardError, District, DistrictId, Gang, Rgb, ALL_UNIT_TYPES,
};
use crate::geometry::Point;

/// Static description of a gang.
pub struct GangInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub color: Rgb,
}

/// Static description of a district.
pub struct DistrictInfo {
    pub name: &'static str,
    pub boundary: &'static [(f64, f64)],
}

pub const GANG_INFO: [GangInfo; 6] = [
    GangInfo { id: "maelstrom", name: "Maelstrom", color: Rgb::new(255, 59, 48) },
    GangInfo { id: "tyger_claws", name: "Tyger Claws", color: Rgb::new(0, 122, 255) },
    GangInfo { id: "voodoo_boys", name: "Voodoo Boys", color: Rgb::new(52, 199, 89) },
    GangInfo { id: "valentinos", name: "Valentinos", color: Rgb::new(255, 45, 85) },
    GangInfo { id: "animals", name: "Animals", color: Rgb::new(255, 149, 0) },
    GangInfo { id: "scavs", name: "Scavs", color: Rgb::new(255, 204, 0) },
];

pub const DISTRICT_INFO: [DistrictInfo; 6] = [
    DistrictInfo {
        name: "Watson",
        boundary: &[
            (116.0, 39.0), (887.0, 36.0), (893.0, 211.0), (866.0, 254.0),
            (721.0, 307.0), (629.0, 313.0), (571.0, 473.0), (516.0, 506.0),
            (245.0, 500.0), (98.0, 353.0), (98.0, 64.0), (119.0, 43.0),
        ],
    },
    DistrictInfo {
        name: "Westbrook",
        boundary: &[
            (629.0, 309.0), (983.0, 312.0), (985.0, 819.0), (944.0, 816.0),
            (655.0, 645.0), (634.0, 573.0), (519.0, 501.0), (568.0, 473.0),
            (632.0, 309.0), (983.0, 312.0),
        ],
    },
    DistrictInfo {
        name: "City Center",
        boundary: &[
            (58.0, 501.0), (517.0, 501.0), (629.0, 573.0), (655.0, 642.0),
            (517.0, 814.0), (483.0, 826.0), (445.0, 837.0), (412.0, 837.0),
            (378.0, 821.0), (350.0, 791.0), (337.0, 742.0), (69.0, 755.0),
            (25.0, 698.0), (23.0, 540.0), (56.0, 499.0),
        ],
    },
    DistrictInfo {
        name: "Heywood",
        boundary: &[
            (23.0, 698.0), (66.0, 760.0), (332.0, 744.0), (358.0, 801.0),
            (396.0, 826.0), (442.0, 844.0), (486.0, 832.0), (532.0, 808.0),
            (657.0, 642.0), (762.0, 714.0), (460.0, 1088.0), (176.0, 1090.0),
            (56.0, 960.0), (20.0, 993.0), (20.0, 698.0),
        ],
    },
    DistrictInfo {
        name: "Pacifica",
        boundary: &[
            (20.0, 995.0), (51.0, 962.0), (176.0, 1090.0), (463.0, 1090.0),
            (463.0, 1118.0), (691.0, 1331.0), (547.0, 1523.0), (20.0, 1520.0),
            (23.0, 993.0),
        ],
    },
    DistrictInfo {
        name: "Santo Domingo",
        boundary: &[
            (765.0, 714.0), (942.0, 819.0), (988.0, 819.0), (1018.0, 816.0),
            (1018.0, 1525.0), (565.0, 1523.0), (706.0, 1323.0), (478.0, 1116.0),
            (478.0, 1090.0), (770.0, 727.0), (768.0, 711.0),
        ],
    },
];

/// Starting garrisons: one unit of every type for each listed gang.
const STARTING_GARRISONS: [(DistrictId, &str); 3] = [
    (DistrictId(0), "maelstrom"),   // Watson
    (DistrictId(1), "tyger_claws"), // Westbrook
    (DistrictId(4), "voodoo_boys"), // Pacifica
];

/// Builds the stock board: six gangs, six districts, three garrisons.
pub fn night_city() -> Result<Board, BoardError> {
    night_city_with(BoardConfig::default())
}

/// Like [`night_city`], with a caller-supplied config. Boundaries stay in the
/// 1024x1536 space regardless of `config.canonical_size`.
pub fn night_city_with(config: BoardConfig) -> Result<Board, BoardError> {
    let gangs = GANG_INFO
        .iter()
        .map(|g| Gang::new(g.id, g.name, g.color))
        .collect();

    let districts = DISTRICT_INFO
        .iter()
        .enumerate()
        .map(|(i, info)| {
            let boundary = info.boundary.iter().copied().map(Point::from).collect();
            District::new(DistrictId(i as u32), info.name, boundary)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut board = Board::new(config, gangs, districts)?;
    for (district, gang) in STARTING_GARRISONS {
        for unit_type in ALL_UNIT_TYPES {
            board.spawn_unit(district, gang, unit_type)?;
        }
    }
    Ok(board)
}

/// Looks up a stock district id by name.
pub fn district_id(name: &str) -> Option<DistrictId> {
    DISTRICT_INFO
        .iter()
        .position(|d| d.name == name)
        .map(|i| DistrictId(i as u32))
}

/// A point known to lie inside the named stock district, for demos and tests.
pub fn anchor_point(name: &str) -> Option<Point> {
    ANCHORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, xy)| Point::from(xy))
}

const ANCHORS: [(&str, (f64, f64)); 6] = [
    ("Watson", (512.0, 256.0)),
    ("Westbrook", (800.0, 600.0)),
    ("City Center", (300.0, 650.0)),
    ("Heywood", (300.0, 900.0)),
    ("Pacifica", (200.0, 1300.0)),
    ("Santo Domingo", (850.0, 1200.0)),
];
