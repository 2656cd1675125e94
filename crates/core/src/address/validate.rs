//! Authoring-time data-quality checks for address datasets.
//!
//! The catalog never runs these on the request path; they back the CLI's
//! `address validate` command so problems are caught before a dataset ships.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::types::{AddressLevel, AddressNode};

/// A problem found in a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetIssue {
    #[error("node at position {position} has an empty code")]
    EmptyCode { position: usize },
    #[error("node {code} has an empty name")]
    EmptyName { code: String },
    #[error("code {code} is used by more than one node")]
    DuplicateCode { code: String },
    #[error("province {code} must not have a parent")]
    ProvinceWithParent { code: String },
    #[error("{level} {code} has no parent")]
    MissingParent { code: String, level: AddressLevel },
    #[error("{level} {code} refers to unknown parent {parent_code}")]
    OrphanedNode {
        code: String,
        level: AddressLevel,
        parent_code: String,
    },
    #[error("{level} {code} has parent {parent_code} of level {parent_level}, expected {expected}")]
    WrongParentLevel {
        code: String,
        level: AddressLevel,
        parent_code: String,
        parent_level: AddressLevel,
        expected: AddressLevel,
    },
}

/// Check a flattened dataset for hierarchy and identity problems.
///
/// Returns every issue found, in dataset order. An empty result means the
/// dataset is consistent.
#[must_use]
pub fn validate_nodes(nodes: &[AddressNode]) -> Vec<DatasetIssue> {
    let mut issues = Vec::new();
    let mut levels: HashMap<&str, AddressLevel> = HashMap::with_capacity(nodes.len());
    let mut reported_duplicates = HashSet::new();

    for (position, node) in nodes.iter().enumerate() {
        if node.code.trim().is_empty() {
            issues.push(DatasetIssue::EmptyCode { position });
            continue;
        }
        if node.name.trim().is_empty() {
            issues.push(DatasetIssue::EmptyName {
                code: node.code.clone(),
            });
        }
        if levels.insert(node.code.as_str(), node.level).is_some()
            && reported_duplicates.insert(node.code.as_str())
        {
            issues.push(DatasetIssue::DuplicateCode {
                code: node.code.clone(),
            });
        }
    }

    for node in nodes.iter().filter(|n| !n.code.trim().is_empty()) {
        match (node.level.parent_level(), node.parent_code.as_deref()) {
            (None, Some(_)) => issues.push(DatasetIssue::ProvinceWithParent {
                code: node.code.clone(),
            }),
            (Some(_), None) => issues.push(DatasetIssue::MissingParent {
                code: node.code.clone(),
                level: node.level,
            }),
            (Some(expected), Some(parent_code)) => match levels.get(parent_code) {
                None => issues.push(DatasetIssue::OrphanedNode {
                    code: node.code.clone(),
                    level: node.level,
                    parent_code: parent_code.to_string(),
                }),
                Some(&parent_level) if parent_level != expected => {
                    issues.push(DatasetIssue::WrongParentLevel {
                        code: node.code.clone(),
                        level: node.level,
                        parent_code: parent_code.to_string(),
                        parent_level,
                        expected,
                    });
                }
                Some(_) => {}
            },
            (None, None) => {}
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_dataset_has_no_issues() {
        let nodes = vec![
            AddressNode::province("320000", "江苏省"),
            AddressNode::city("320100", "南京市", "320000"),
            AddressNode::district("320102", "玄武区", "320100"),
        ];
        assert!(validate_nodes(&nodes).is_empty());
    }

    #[test]
    fn test_duplicate_reported_once() {
        let nodes = vec![
            AddressNode::province("320000", "江苏省"),
            AddressNode::province("320000", "江苏"),
            AddressNode::province("320000", "苏"),
        ];
        assert_eq!(
            validate_nodes(&nodes),
            vec![DatasetIssue::DuplicateCode {
                code: "320000".to_string()
            }]
        );
    }

    #[test]
    fn test_orphaned_city() {
        let nodes = vec![AddressNode::city("320100", "南京市", "999999")];
        assert_eq!(
            validate_nodes(&nodes),
            vec![DatasetIssue::OrphanedNode {
                code: "320100".to_string(),
                level: AddressLevel::City,
                parent_code: "999999".to_string(),
            }]
        );
    }

    #[test]
    fn test_district_under_province() {
        let nodes = vec![
            AddressNode::province("320000", "江苏省"),
            AddressNode::district("320102", "玄武区", "320000"),
        ];
        let issues = validate_nodes(&nodes);
        assert!(matches!(
            issues.as_slice(),
            [DatasetIssue::WrongParentLevel {
                parent_level: AddressLevel::Province,
                expected: AddressLevel::City,
                ..
            }]
        ));
    }

    #[test]
    fn test_province_with_parent_and_city_without() {
        let mut province = AddressNode::province("320000", "江苏省");
        province.parent_code = Some("000000".to_string());
        let mut city = AddressNode::city("320100", "南京市", "320000");
        city.parent_code = None;

        let issues = validate_nodes(&[province, city]);
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], DatasetIssue::ProvinceWithParent { .. }));
        assert!(matches!(issues[1], DatasetIssue::MissingParent { .. }));
    }

    #[test]
    fn test_empty_code_and_name() {
        let nodes = vec![
            AddressNode::province("", "无编码"),
            AddressNode::province("650000", " "),
        ];
        assert_eq!(
            validate_nodes(&nodes),
            vec![
                DatasetIssue::EmptyCode { position: 0 },
                DatasetIssue::EmptyName {
                    code: "650000".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_issue_display() {
        let issue = DatasetIssue::OrphanedNode {
            code: "320100".to_string(),
            level: AddressLevel::City,
            parent_code: "999999".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "city 320100 refers to unknown parent 999999"
        );
    }
}
