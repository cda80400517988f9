use jsontrove_core::{
    Address, AddressTarget, BrowseConfig, FileClass, NodeKind, TreeNode,
};
use std::path::PathBuf;

#[test]
fn test_address_round_trip_law() {
    let cases = [
        ("/r/y.zip", "e.json"),
        ("/r/y.zip", "a/b/c.json"),
        ("C:\\data\\bundle.zip", "nested/dir/x.json"),
        ("relative.zip", "with,comma.json"),
        ("/r/y.zip", ""),
    ];

    for (archive, entry) in cases {
        let address = Address::archive_entry(archive, entry);
        assert_eq!(
            address.decode(),
            AddressTarget::ArchiveEntry {
                archive: PathBuf::from(archive),
                entry: entry.to_string(),
            },
            "round trip failed for {address}"
        );
    }

    for path in ["/r/d/x.json", "relative/file.json", "C:\\data\\x.json"] {
        assert_eq!(
            Address::plain(path).decode(),
            AddressTarget::Plain(PathBuf::from(path))
        );
    }
}

#[test]
fn test_address_target_encode() {
    let target = AddressTarget::ArchiveEntry {
        archive: PathBuf::from("/r/y.zip"),
        entry: "a/e.json".to_string(),
    };
    assert_eq!(target.encode().as_str(), "zip:/r/y.zip,a/e.json");
    assert_eq!(target.encode().decode(), target);
}

#[test]
fn test_address_parses_from_str() {
    let address: Address = "zip:/r/y.zip,e.json".parse().unwrap();
    assert!(address.is_archive_entry());
    assert_eq!(address.to_string(), "zip:/r/y.zip,e.json");
}

#[test]
fn test_leaf_nodes_have_no_children() {
    let nodes = [
        TreeNode::new_file("a.json", Address::plain("/a.json")),
        TreeNode::new_entry_leaf("b.json", Address::archive_entry("/z.zip", "b.json")),
        TreeNode::new_json_leaf("k : \"v\""),
    ];
    for node in nodes {
        assert!(node.is_leaf());
        assert_eq!(node.child_count(), 0);
        assert!(node.is_well_formed());
    }
}

#[test]
fn test_only_leaves_and_archives_are_addressable() {
    assert!(TreeNode::new_directory("d").address().is_none());
    assert!(TreeNode::new_entry_group("g").address().is_none());
    assert!(TreeNode::new_json_internal("k").address().is_none());
    assert!(
        TreeNode::new_archive("y.zip", Address::plain("/r/y.zip"))
            .address()
            .is_some()
    );
}

#[test]
fn test_duplicate_groups_are_not_well_formed() {
    let mut archive = TreeNode::new_archive("y.zip", Address::plain("/r/y.zip"));
    archive.push_child(TreeNode::new_entry_group("a"));
    archive.push_child(TreeNode::new_entry_group("a"));
    assert!(!archive.is_well_formed());
}

#[test]
fn test_leaf_and_group_sharing_a_name_are_not_well_formed() {
    let mut archive = TreeNode::new_archive("y.zip", Address::plain("/r/y.zip"));
    archive.push_child(TreeNode::new_entry_leaf(
        "a",
        Address::archive_entry("/r/y.zip", "a"),
    ));
    archive.push_child(TreeNode::new_entry_group("a"));
    assert!(!archive.is_well_formed());
}

#[test]
fn test_tree_node_serializes_with_kind_tag() {
    let mut root = TreeNode::new_directory("r");
    root.push_child(TreeNode::new_file("x.json", Address::plain("/r/x.json")));

    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["type"], "directory");
    assert_eq!(json["children"][0]["type"], "file");
    assert_eq!(json["children"][0]["address"], "/r/x.json");
    assert!(json["children"][0].get("children").is_none());

    let back: TreeNode = serde_json::from_value(json).unwrap();
    assert_eq!(back, root);
    assert!(matches!(back.children[0].kind, NodeKind::File { .. }));
}

#[test]
fn test_config_classification_defaults() {
    let config = BrowseConfig::default();
    assert_eq!(config.root, PathBuf::from("."));
    assert_eq!(config.classify("x.Json"), FileClass::Json);
    assert_eq!(config.classify("y.ZIP"), FileClass::Archive);
    assert_eq!(config.classify("y.txt"), FileClass::Ignored);
}

#[test]
fn test_config_custom_extensions() {
    let config = BrowseConfig::builder()
        .root("/data")
        .json_extensions(vec!["json".to_string(), ".geojson".to_string()])
        .archive_extensions(vec!["zip".to_string(), "jar".to_string()])
        .build()
        .unwrap();

    assert_eq!(config.classify("map.GeoJSON"), FileClass::Json);
    assert_eq!(config.classify("lib.jar"), FileClass::Archive);
}
