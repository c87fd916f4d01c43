// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end loading of the figure data shapes.

use figkit_data::{LoadError, MemorySource, RowMapper, load};

fn source() -> MemorySource {
    MemorySource::new()
        .with_file(
            "ks-distances.csv",
            "dataset,engine,ks_distance\nB1,xtandem,0.61\nB1,comet,0.44\nA2,msgf,0.52\n",
        )
        .with_file(
            "A-comet-roc.json",
            r#"[{"method":"IDPEP","fp_rate":0.0,"tp_rate":0.0},
                {"method":"IDPEP","fp_rate":0.5,"tp_rate":0.9},
                {"method":"Percolator","fp_rate":0.0,"tp_rate":0.0}]"#,
        )
}

#[test]
fn csv_rows_group_by_engine() {
    let mapper = RowMapper::new()
        .text("dataset")
        .text("engine")
        .number("ks_distance");
    let data = load(&source(), "ks-distances.csv", Some(&mapper)).unwrap();
    let groups = data.group_by(&["engine"]);
    assert_eq!(groups.keys(), ["xtandem", "comet", "msgf"], "lanes in file order");
    assert_eq!(
        groups
            .get("comet")
            .and_then(|d| d.get(0))
            .and_then(|r| r.number("ks_distance")),
        Some(0.44),
        "coerced distance"
    );
}

#[test]
fn json_series_group_by_method() {
    let mapper = RowMapper::new()
        .text("method")
        .number("fp_rate")
        .number("tp_rate");
    let data = load(&source(), "A-comet-roc.json", Some(&mapper)).unwrap();
    let groups = data.group_by(&["method"]);
    assert_eq!(groups.get("IDPEP").map(|d| d.len()), Some(2), "IDPEP curve");
    assert_eq!(groups.get("Percolator").map(|d| d.len()), Some(1), "Percolator curve");
}

#[test]
fn missing_required_field_fails_at_load_time() {
    let mapper = RowMapper::new().number("difference");
    let err = load(&source(), "ks-distances.csv", Some(&mapper)).unwrap_err();
    assert!(
        matches!(err, LoadError::SchemaMismatch { ref field, .. } if field == "difference"),
        "got {err:?}"
    );
    assert!(err.to_string().contains("difference"), "descriptive message: {err}");
}
