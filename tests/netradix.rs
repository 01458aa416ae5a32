use netradix::{Error, NetRadixTree};
use pretty_assertions::assert_eq;

const DATA: [(&str, &str); 6] = [
    ("217.72.192.0/20", "UDATA1"),
    ("217.72.195.0/24", "UDATA2"),
    ("195.161.113.74/32", "UDATA3"),
    ("172.16.2.2", "UDATA4"),
    ("10.42.0.0/16", "UDATA5"),
    ("2001:220::/35", "UDATA6"),
];

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn loaded() -> NetRadixTree<String> {
    init();
    let mut tree = NetRadixTree::new();
    for (prefix, data) in DATA {
        assert_eq!(tree.insert_str(prefix, data.to_string()), Ok(None));
    }
    tree
}

#[test]
fn search_exact() {
    let tree = loaded();
    for (prefix, data) in DATA {
        assert_eq!(
            tree.search_exact_str(prefix).unwrap().map(String::as_str),
            Some(data),
            "{prefix}"
        );
    }
    for prefix in [
        "217.72.195.42",
        "10.42.1.0/24",
        "10.42.1.8",
        "2001:220::/128",
        "15.161.13.75",
    ] {
        assert_eq!(tree.search_exact_str(prefix), Ok(None), "{prefix}");
    }
}

#[test]
fn search_best() {
    let tree = loaded();
    for (prefix, data) in [
        ("217.72.192.1", Some("UDATA1")),
        ("217.72.195.42", Some("UDATA2")),
        ("195.161.113.74", Some("UDATA3")),
        ("172.16.2.2", Some("UDATA4")),
        ("15.161.13.75", None),
        ("10.42.1.0/24", Some("UDATA5")),
        ("10.42.1.8", Some("UDATA5")),
        ("2001:220::/128", Some("UDATA6")),
    ] {
        assert_eq!(
            tree.search_best_str(prefix).unwrap().map(String::as_str),
            data,
            "{prefix}"
        );
    }
}

#[test]
fn remove_everything() {
    let mut tree = loaded();
    for (prefix, data) in DATA {
        assert_eq!(tree.remove_str(prefix), Ok(Some(data.to_string())));
        assert_eq!(tree.search_exact_str(prefix), Ok(None));
    }
    for (prefix, _) in DATA {
        assert_eq!(tree.remove_str(prefix), Ok(None));
        assert_eq!(tree.search_best_str(prefix), Ok(None));
    }
    assert!(tree.is_empty());
}

#[test]
fn remove_keeps_covering_prefix() {
    let mut tree = loaded();
    assert_eq!(tree.remove_str("217.72.195.0/24"), Ok(Some("UDATA2".into())));
    assert_eq!(
        tree.search_best_str("217.72.195.42").unwrap().map(String::as_str),
        Some("UDATA1")
    );
    assert_eq!(tree.remove_str("10.42.0.0/16"), Ok(Some("UDATA5".into())));
    assert_eq!(tree.search_best_str("10.42.1.8"), Ok(None));
}

#[test]
fn default_route() {
    let mut tree = loaded();
    tree.insert_str("0.0.0.0/0", "DEFAULT".to_string()).unwrap();
    assert_eq!(
        tree.search_best_str("15.161.13.75").unwrap().map(String::as_str),
        Some("DEFAULT")
    );
    // the IPv4 default route does not cover IPv6 addresses
    assert_eq!(tree.search_best_str("2001:db8::1"), Ok(None));
    assert_eq!(tree.remove_str("0.0.0.0/0"), Ok(Some("DEFAULT".into())));
    assert_eq!(tree.search_best_str("15.161.13.75"), Ok(None));
}

#[test]
fn invalid_input() {
    let mut tree = loaded();
    assert_eq!(
        tree.insert_str("217.72.192.300/20", String::new()),
        Err(Error::InvalidAddress("217.72.192.300".into()))
    );
    assert!(matches!(
        tree.search_exact_str("10.42.0.0/33"),
        Err(Error::InvalidMaskLength { max: 32, .. })
    ));
    assert!(matches!(
        tree.search_best_str("2001:220::/129"),
        Err(Error::InvalidMaskLength { max: 128, .. })
    ));
    assert!(matches!(
        tree.remove_str("10.42.0.0/"),
        Err(Error::InvalidMaskLength { .. })
    ));
    // nothing changed
    assert_eq!(
        tree.search_exact_str("10.42.0.0/16").unwrap().map(String::as_str),
        Some("UDATA5")
    );
}

#[test]
fn destroy_releases_every_payload() {
    let tree = loaded();
    let mut released = Vec::new();
    tree.destroy(|data: String| released.push(data));
    released.sort();
    let mut expected: Vec<String> = DATA.iter().map(|(_, d)| d.to_string()).collect();
    expected.sort();
    assert_eq!(released, expected);
}
