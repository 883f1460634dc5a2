use faultsched_core::action_doc::parse_fault_block;

#[test]
fn extracts_key_value_pairs_from_block() {
    let doc = "Kills the leader process.\n\
               [fault]\n\
               target=leader\n\
               udf1=force\n\
               [/fault]\n\
               Trailing text outside the block.";
    let pairs = parse_fault_block(doc);
    assert_eq!(pairs.get("target"), Some(&"leader".to_string()));
    assert_eq!(pairs.get("udf1"), Some(&"force".to_string()));
    assert_eq!(pairs.len(), 2);
}

#[test]
fn duplicate_keys_use_last_occurrence() {
    let doc = "[fault]\ntarget=a\ntarget=b\n[/fault]";
    let pairs = parse_fault_block(doc);
    assert_eq!(pairs.get("target"), Some(&"b".to_string()));
}

#[test]
fn doc_without_a_block_yields_no_pairs() {
    let doc = "Just a normal doc comment with no annotations.";
    assert!(parse_fault_block(doc).is_empty());
}

#[test]
fn lines_outside_block_are_ignored_even_if_key_value_shaped() {
    let doc = "ignored=yes\n[fault]\nkept=yes\n[/fault]\nalso_ignored=yes";
    let pairs = parse_fault_block(doc);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs.get("kept"), Some(&"yes".to_string()));
}
