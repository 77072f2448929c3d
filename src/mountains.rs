//! Built-in catalog of mountains with current-conditions support.

use crate::grid::{self, GeoCoordinate, GridCoordinate};

#[derive(Debug, Clone, PartialEq)]
pub struct Mountain {
    pub name: &'static str,
    pub korean_name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub height_m: u32,
    pub region: &'static str,
}

impl Mountain {
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.latitude, self.longitude)
    }

    pub fn grid(&self) -> GridCoordinate {
        grid::convert(self.latitude, self.longitude)
    }
}

const MOUNTAINS: &[Mountain] = &[
    Mountain {
        name: "Seoraksan",
        korean_name: "설악산",
        latitude: 38.119,
        longitude: 128.465,
        height_m: 1708,
        region: "Gangwon-do",
    },
    Mountain {
        name: "Jirisan",
        korean_name: "지리산",
        latitude: 35.334,
        longitude: 127.731,
        height_m: 1915,
        region: "Gyeongsangnam-do",
    },
    Mountain {
        name: "Hallasan",
        korean_name: "한라산",
        latitude: 33.362,
        longitude: 126.533,
        height_m: 1947,
        region: "Jeju-do",
    },
    Mountain {
        name: "Bukhansan",
        korean_name: "북한산",
        latitude: 37.659,
        longitude: 126.978,
        height_m: 836,
        region: "Seoul",
    },
    Mountain {
        name: "Deogyusan",
        korean_name: "덕유산",
        latitude: 35.860,
        longitude: 127.746,
        height_m: 1614,
        region: "Jeollabuk-do",
    },
    Mountain {
        name: "Sobaeksan",
        korean_name: "소백산",
        latitude: 36.957,
        longitude: 128.485,
        height_m: 1439,
        region: "Gyeongsangbuk-do",
    },
    Mountain {
        name: "Odaesan",
        korean_name: "오대산",
        latitude: 37.794,
        longitude: 128.543,
        height_m: 1563,
        region: "Gangwon-do",
    },
    Mountain {
        name: "Taebaeksan",
        korean_name: "태백산",
        latitude: 37.096,
        longitude: 128.916,
        height_m: 1567,
        region: "Gangwon-do",
    },
];

pub fn all() -> &'static [Mountain] {
    MOUNTAINS
}

/// Distinct regions in catalog order
pub fn regions() -> Vec<&'static str> {
    let mut regions: Vec<&'static str> = Vec::new();
    for mountain in MOUNTAINS {
        if !regions.contains(&mountain.region) {
            regions.push(mountain.region);
        }
    }
    regions
}

/// `None` selects every mountain
pub fn filter_by_region(region: Option<&str>) -> Vec<&'static Mountain> {
    MOUNTAINS
        .iter()
        .filter(|m| region.map_or(true, |r| m.region.eq_ignore_ascii_case(r.trim())))
        .collect()
}

/// Catalog spelling of a region, matched case-insensitively
pub fn resolve_region(region: &str) -> Option<&'static str> {
    regions()
        .into_iter()
        .find(|r| r.eq_ignore_ascii_case(region.trim()))
}

pub fn find(name: &str) -> Option<&'static Mountain> {
    let name = name.trim();
    MOUNTAINS
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name) || m.korean_name == name)
}
