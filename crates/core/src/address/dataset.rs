//! Nested dataset format and flattening.

use serde::{Deserialize, Serialize};

use crate::types::AddressNode;

/// The dataset bundled with the crate.
pub(super) const EMBEDDED_DATASET: &str = include_str!("../../data/regions.json");

/// A province as written in a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceRecord {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub cities: Vec<CityRecord>,
}

/// A city as written in a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub districts: Vec<DistrictRecord>,
}

/// A district as written in a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictRecord {
    pub code: String,
    pub name: String,
}

/// Flatten nested records into nodes, depth first.
///
/// Each province is followed by its cities, and each city by its districts,
/// so declaration order in the file is preserved within every level.
#[must_use]
pub fn flatten(provinces: Vec<ProvinceRecord>) -> Vec<AddressNode> {
    let mut nodes = Vec::new();

    for province in provinces {
        let province_code = province.code;
        nodes.push(AddressNode::province(province_code.clone(), province.name));

        for city in province.cities {
            let city_code = city.code;
            nodes.push(AddressNode::city(
                city_code.clone(),
                city.name,
                province_code.clone(),
            ));

            nodes.extend(city.districts.into_iter().map(|district| {
                AddressNode::district(district.code, district.name, city_code.clone())
            }));
        }
    }

    nodes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::AddressLevel;

    #[test]
    fn test_flatten_links_parents() {
        let records = vec![ProvinceRecord {
            code: "330000".to_string(),
            name: "浙江省".to_string(),
            cities: vec![CityRecord {
                code: "330100".to_string(),
                name: "杭州市".to_string(),
                districts: vec![DistrictRecord {
                    code: "330106".to_string(),
                    name: "西湖区".to_string(),
                }],
            }],
        }];

        let nodes = flatten(records);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].level, AddressLevel::Province);
        assert_eq!(nodes[1].parent_code.as_deref(), Some("330000"));
        assert_eq!(nodes[2].level, AddressLevel::District);
        assert_eq!(nodes[2].parent_code.as_deref(), Some("330100"));
    }

    #[test]
    fn test_missing_children_default_to_empty() {
        let records: Vec<ProvinceRecord> =
            serde_json::from_str(r#"[{"code": "710000", "name": "台湾省"}]"#).unwrap();
        let nodes = flatten(records);
        assert_eq!(nodes, vec![AddressNode::province("710000", "台湾省")]);
    }
}
