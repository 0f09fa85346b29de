//! Workspace-symbol request conformance: canonical ordering, the
//! free-text grammar, structured descriptors, and reload behavior.

use symdex::symbol::SymbolDescriptor;

use crate::helpers::fixtures::*;

fn descriptor(build: impl FnOnce(&mut SymbolDescriptor)) -> SymbolDescriptor {
    let mut d = SymbolDescriptor::default();
    build(&mut d);
    d
}

#[tokio::test]
async fn basic_free_text_queries() {
    let ws = basic_workspace();
    let both = ws.expect(&["a.go:function:A:1:17", "b.go:function:B:1:17"]);

    assert_eq!(ws.query("").await, both);
    assert_eq!(ws.query("A").await, ws.expect(&["a.go:function:A:1:17"]));
    assert_eq!(ws.query("B").await, ws.expect(&["b.go:function:B:1:17"]));
    assert_eq!(ws.query("is:exported").await, both);
    assert_eq!(ws.query("dir:/").await, both);
    assert_eq!(ws.query("dir:/ A").await, ws.expect(&["a.go:function:A:1:17"]));
    assert_eq!(ws.query("dir:/ B").await, ws.expect(&["b.go:function:B:1:17"]));
}

#[tokio::test]
async fn basic_descriptor_queries() {
    let ws = basic_workspace();
    let both = ws.expect(&["a.go:function:A:1:17", "b.go:function:B:1:17"]);
    let only_a = ws.expect(&["a.go:function:A:1:17"]);
    let only_b = ws.expect(&["b.go:function:B:1:17"]);

    // Present-but-empty descriptor matches everything.
    assert_eq!(ws.lookup(SymbolDescriptor::default()).await, both);

    // Individual filter fields.
    assert_eq!(
        ws.lookup(descriptor(|d| d.package = Some("test/pkg".into()))).await,
        both
    );
    assert_eq!(ws.lookup(descriptor(|d| d.name = Some("A".into()))).await, only_a);
    assert_eq!(ws.lookup(descriptor(|d| d.name = Some("B".into()))).await, only_b);
    assert_eq!(
        ws.lookup(descriptor(|d| d.package_name = Some("p".into()))).await,
        both
    );
    assert_eq!(ws.lookup(descriptor(|d| d.recv = Some(String::new()))).await, both);
    assert_eq!(ws.lookup(descriptor(|d| d.vendor = Some(false))).await, both);

    // Combined filter fields AND together.
    assert_eq!(
        ws.lookup(descriptor(|d| {
            d.package = Some("test/pkg".into());
            d.name = Some("A".into());
        }))
        .await,
        only_a
    );
    assert_eq!(
        ws.lookup(descriptor(|d| {
            d.package = Some("test/pkg".into());
            d.name = Some("B".into());
            d.package_name = Some("p".into());
            d.recv = Some(String::new());
            d.vendor = Some(false);
        }))
        .await,
        only_b
    );
}

#[tokio::test]
async fn descriptor_and_semantics_match_fully_specified_form() {
    let ws = basic_workspace();
    let partial = ws
        .lookup(descriptor(|d| {
            d.package = Some("test/pkg".into());
            d.name = Some("A".into());
        }))
        .await;
    let full = ws
        .lookup(descriptor(|d| {
            d.package = Some("test/pkg".into());
            d.name = Some("A".into());
            d.package_name = Some("p".into());
            d.recv = Some(String::new());
            d.vendor = Some(false);
        }))
        .await;
    assert_eq!(partial, full);
    assert_eq!(partial, ws.expect(&["a.go:function:A:1:17"]));
}

#[tokio::test]
async fn identity_lookup() {
    let ws = basic_workspace();
    assert_eq!(
        ws.lookup(descriptor(|d| d.id = Some("test/pkg/-/B".into()))).await,
        ws.expect(&["b.go:function:B:1:17"])
    );
    assert_eq!(
        ws.lookup(descriptor(|d| d.id = Some("test/pkg/-/A".into()))).await,
        ws.expect(&["a.go:function:A:1:17"])
    );
}

#[tokio::test]
async fn detailed_workspace_symbol() {
    let ws = detailed_workspace();
    let both = ws.expect(&["a.go:class:T:1:17", "a.go:field:T.F:1:28"]);

    assert_eq!(ws.query("").await, both);
    assert_eq!(ws.query("T").await, both);
    assert_eq!(ws.query("F").await, ws.expect(&["a.go:field:T.F:1:28"]));
    assert_eq!(ws.query("is:exported").await, both);
}

#[tokio::test]
async fn exported_filter_excludes_fields_of_unexported_types() {
    let ws = exported_workspace();
    assert_eq!(ws.query("is:exported").await, Vec::<String>::new());
}

#[tokio::test]
async fn subdirectory_dir_filter_normalization() {
    let ws = subdirectory_workspace();
    let root_unit = ws.expect(&["a.go:function:A:1:17"]);
    let sub_unit = ws.expect(&["d2/b.go:function:B:1:39"]);

    assert_eq!(
        ws.query("").await,
        ws.expect(&["a.go:function:A:1:17", "d2/b.go:function:B:1:39"])
    );
    assert_eq!(
        ws.query("is:exported").await,
        ws.expect(&["a.go:function:A:1:17", "d2/b.go:function:B:1:39"])
    );

    // Root directory spellings, all equivalent and non-recursive.
    for q in ["dir:", "dir:/", "dir:.", "dir:./"] {
        assert_eq!(ws.query(q).await, root_unit, "query {:?}", q);
    }
    // Subdirectory spellings.
    for q in ["dir:/d2", "dir:./d2", "dir:d2/"] {
        assert_eq!(ws.query(q).await, sub_unit, "query {:?}", q);
    }
}

#[tokio::test]
async fn multiple_packages_in_dir() {
    let ws = multiple_package_workspace();
    let only_a = ws.expect(&["a.go:function:A:1:17"]);

    assert_eq!(ws.query("").await, only_a);
    assert_eq!(ws.query("is:exported").await, only_a);
    assert_eq!(
        ws.lookup(descriptor(|d| {
            d.package = Some("test/pkg".into());
            d.name = Some("A".into());
            d.package_name = Some("p".into());
            d.recv = Some(String::new());
            d.vendor = Some(false);
        }))
        .await,
        only_a
    );
}

#[tokio::test]
async fn test_variant_units_appear_in_workspace_results() {
    let ws = xtest_workspace();
    assert_eq!(
        ws.query("").await,
        ws.expect(&[
            "a.go:function:A:1:17",
            "b_test.go:function:Y:1:17",
            "y_test.go:function:Y:1:22",
        ])
    );
}

#[tokio::test]
async fn go_symbols_canonical_order_for_empty_query() {
    let ws = symbols_workspace();
    assert_eq!(
        ws.query("").await,
        ws.expect(&[
            "abc.go:variable:A:8:2",
            "abc.go:constant:B:12:2",
            "abc.go:class:C:17:2",
            "abc.go:class:T:22:6",
            "abc.go:interface:UVW:20:6",
            "abc.go:class:XYZ:3:6",
            "bcd.go:class:YZA:3:6",
            "cde.go:variable:a:4:2",
            "cde.go:variable:b:4:5",
            "cde.go:variable:c:5:2",
            "xyz.go:function:yza:3:6",
            "abc.go:method:XYZ.ABC:5:14",
            "bcd.go:method:YZA.BCD:5:14",
        ])
    );
}

#[tokio::test]
async fn go_symbols_substring_grouping() {
    let ws = symbols_workspace();

    // Name matches precede the file-name-only match.
    assert_eq!(
        ws.query("xyz").await,
        ws.expect(&[
            "abc.go:class:XYZ:3:6",
            "abc.go:method:XYZ.ABC:5:14",
            "xyz.go:function:yza:3:6",
        ])
    );
    assert_eq!(
        ws.query("yza").await,
        ws.expect(&[
            "bcd.go:class:YZA:3:6",
            "xyz.go:function:yza:3:6",
            "bcd.go:method:YZA.BCD:5:14",
        ])
    );
    assert_eq!(
        ws.query("abc").await,
        ws.expect(&[
            "abc.go:method:XYZ.ABC:5:14",
            "abc.go:variable:A:8:2",
            "abc.go:constant:B:12:2",
            "abc.go:class:C:17:2",
            "abc.go:class:T:22:6",
            "abc.go:interface:UVW:20:6",
            "abc.go:class:XYZ:3:6",
        ])
    );
    assert_eq!(
        ws.query("bcd").await,
        ws.expect(&["bcd.go:method:YZA.BCD:5:14", "bcd.go:class:YZA:3:6"])
    );
    assert_eq!(
        ws.query("cde").await,
        ws.expect(&[
            "cde.go:variable:a:4:2",
            "cde.go:variable:b:4:5",
            "cde.go:variable:c:5:2",
        ])
    );
}

#[tokio::test]
async fn go_symbols_exported_filter() {
    let ws = symbols_workspace();
    assert_eq!(
        ws.query("is:exported").await,
        ws.expect(&[
            "abc.go:variable:A:8:2",
            "abc.go:constant:B:12:2",
            "abc.go:class:C:17:2",
            "abc.go:class:T:22:6",
            "abc.go:interface:UVW:20:6",
            "abc.go:class:XYZ:3:6",
            "bcd.go:class:YZA:3:6",
            "abc.go:method:XYZ.ABC:5:14",
            "bcd.go:method:YZA.BCD:5:14",
        ])
    );
}

#[tokio::test]
async fn vendored_units_and_vendor_filter() {
    let ws = vendored_workspace();

    assert_eq!(
        ws.query("").await,
        ws.expect(&["a.go:function:A:1:17", "vendor/foo/b.go:function:B:1:19"])
    );
    assert_eq!(
        ws.lookup(descriptor(|d| d.vendor = Some(false))).await,
        ws.expect(&["a.go:function:A:1:17"])
    );
    assert_eq!(
        ws.lookup(descriptor(|d| d.vendor = Some(true))).await,
        ws.expect(&["vendor/foo/b.go:function:B:1:19"])
    );
    // Vendored import paths resolve past the vendor segment.
    assert_eq!(
        ws.lookup(descriptor(|d| d.package = Some("foo".into()))).await,
        ws.expect(&["vendor/foo/b.go:function:B:1:19"])
    );
}

#[tokio::test]
async fn determinism_across_repeated_queries() {
    let ws = symbols_workspace();
    for query in ["", "xyz", "is:exported", "dir:/ abc"] {
        let first = ws.query(query).await;
        let second = ws.query(query).await;
        assert_eq!(first, second, "query {:?}", query);
    }
}

#[tokio::test]
async fn idempotent_reload_leaves_results_unchanged() {
    let ws = symbols_workspace();
    let before = ws.query("").await;

    // Re-extracting an unchanged unit replaces its entries with an
    // identical sequence.
    ws.engine.reload_unit(ws.root(), "abc.go").await.unwrap();

    assert_eq!(ws.query("").await, before);
    assert_eq!(
        ws.query("xyz").await,
        ws.expect(&[
            "abc.go:class:XYZ:3:6",
            "abc.go:method:XYZ.ABC:5:14",
            "xyz.go:function:yza:3:6",
        ])
    );
}

#[tokio::test]
async fn descriptor_takes_precedence_over_free_text() {
    let ws = basic_workspace();
    let records = ws
        .server
        .workspace_symbols(symdex::server::WorkspaceSymbolParams {
            query: Some("A".to_string()),
            symbol: Some(descriptor(|d| d.name = Some("B".into()))),
        })
        .await
        .unwrap();
    let encoded: Vec<String> = records.iter().map(|s| s.encode()).collect();
    assert_eq!(encoded, ws.expect(&["b.go:function:B:1:17"]));
}

#[tokio::test]
async fn unrecognized_filter_tokens_are_plain_text() {
    let ws = basic_workspace();
    // "kind:function" matches nothing as a substring; permissive
    // parsing means an empty result, not an error.
    assert_eq!(ws.query("kind:function").await, Vec::<String>::new());
}
