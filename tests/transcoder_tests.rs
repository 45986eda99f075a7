//! Integration tests for the config-line transcoder
//!
//! Covers encoding, decoding, rule checking and duplicate detection through
//! the public entry points, using the shipped resource trees.

mod common;

use common::{flow_server, igmp_snooping_vlan, lines, output_interface, sampling_instance};
use pretty_assertions::assert_eq;
use tfjunos::lifecycle::{self, Resource};
use tfjunos::resources::{
    FlowServer, IgmpSnoopingVlan, LldpInterface, Output, OutputInterface, SamplingInstance,
    SnoopingInterface, StaticGroup,
};
use tfjunos::transcoder::{self, Attr, Blocks, TranscodeError};

const LLDP_PREFIX: &str = "set protocols lldp interface \"ge-0/0/1\" ";

fn relative(lines: &[String], prefix: &str) -> String {
    let body: Vec<String> = lines
        .iter()
        .map(|l| format!("set {}", l.strip_prefix(prefix).unwrap_or(l)))
        .collect();
    format!(
        "\n<configuration-output>\n{}\n</configuration-output>\n",
        body.join("\n")
    )
}

// ============================================================================
// Encode
// ============================================================================

#[test]
fn test_single_flag_encodes_one_line() {
    let tree = LldpInterface {
        disable: true,
        ..LldpInterface::named("ge-0/0/1")
    };
    let lines = transcoder::encode(&tree, LLDP_PREFIX).unwrap();
    assert_eq!(lines, vec![format!("{}disable", LLDP_PREFIX)]);
}

#[test]
fn test_empty_tree_encodes_nothing() {
    let tree = LldpInterface::named("ge-0/0/1");
    assert!(transcoder::encode(&tree, LLDP_PREFIX).unwrap().is_empty());
    // the lifecycle still creates the object
    assert_eq!(
        lifecycle::set_lines(&tree).unwrap(),
        vec!["set protocols lldp interface \"ge-0/0/1\""]
    );
}

#[test]
fn test_duplicate_sibling_identifiers_rejected() {
    let output = Output {
        interface: Blocks::from(vec![
            output_interface("eth0", 1, 1),
            output_interface("eth1", 2, 2),
            output_interface("eth0", 3, 3),
        ]),
        ..Output::default()
    };
    let err = transcoder::encode(&output, "set foo ").unwrap_err();
    match &err {
        TranscodeError::Duplicate {
            identifier, block, ..
        } => {
            assert_eq!(identifier, "eth0");
            assert_eq!(block, "interface");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.path().unwrap().to_string(), "interface[2].name");
    assert!(err.to_string().contains("\"eth0\""));
}

#[test]
fn test_duplicate_rejected_whatever_the_fields() {
    let output = Output {
        interface: Blocks::from(vec![
            output_interface("sp-0/0/0", 1, 1),
            OutputInterface {
                name: "sp-0/0/0".to_string(),
                source_address: Attr::from("192.0.2.1"),
                ..OutputInterface::default()
            },
        ]),
        ..Output::default()
    };
    let errors = transcoder::validate(&output);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], TranscodeError::Duplicate { .. }));
}

#[test]
fn test_quoted_values_rejected_before_encoding() {
    let tree = SamplingInstance {
        family_inet_output: Some(Output {
            flow_server: Blocks::from(vec![FlowServer {
                forwarding_class: Attr::from("x\"y"),
                ..flow_server("a\"b", 2055)
            }]),
            ..Output::default()
        }),
        ..SamplingInstance::new("samp1", "default")
    };

    let errors = transcoder::validate(&tree);
    let paths: Vec<String> = errors
        .iter()
        .filter_map(|e| e.path().map(ToString::to_string))
        .collect();
    assert_eq!(
        paths,
        vec![
            "family_inet_output.flow_server[0].hostname",
            "family_inet_output.flow_server[0].forwarding_class",
        ]
    );
    assert!(errors
        .iter()
        .all(|e| matches!(e, TranscodeError::InvalidValue { .. })));

    let err = transcoder::encode(&tree, &tree.set_prefix()).unwrap_err();
    assert!(matches!(err, TranscodeError::InvalidValue { .. }));
}

#[test]
fn test_quoted_values_with_spaces_round_trip() {
    let tree = SamplingInstance {
        family_inet_output: Some(Output {
            extension_service: vec!["jflow service".to_string()],
            flow_server: Blocks::from(vec![FlowServer {
                forwarding_class: Attr::from("best effort"),
                ..flow_server("collector one", 2055)
            }]),
            ..Output::default()
        }),
        ..SamplingInstance::new("samp1", "default")
    };
    assert!(transcoder::validate(&tree).is_empty());

    let prefix = tree.set_prefix();
    let encoded = transcoder::encode(&tree, &prefix).unwrap();
    let mut back = SamplingInstance::new("samp1", "default");
    transcoder::decode_into(&mut back, &relative(&encoded, &prefix), &prefix).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_empty_identifier_rejected() {
    let output = Output {
        flow_server: Blocks::from(vec![flow_server("", 1)]),
        ..Output::default()
    };
    let errors = transcoder::validate(&output);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path().unwrap().to_string(), "flow_server[0].hostname");
    assert_eq!(errors[0].to_string(), "hostname: must not be empty");
    assert!(transcoder::encode(&output, "set x ").is_err());
}

#[test]
fn test_sibling_parents_have_separate_scopes() {
    let group = || StaticGroup {
        address: "233.252.0.1".to_string(),
        source: Attr::Unset,
    };
    let vlan = IgmpSnoopingVlan {
        interface: Blocks::from(vec![
            SnoopingInterface {
                name: "ge-0/0/1.0".to_string(),
                static_group: Blocks::from(vec![group()]),
                ..SnoopingInterface::default()
            },
            SnoopingInterface {
                name: "ge-0/0/2.0".to_string(),
                static_group: Blocks::from(vec![group()]),
                ..SnoopingInterface::default()
            },
        ]),
        ..IgmpSnoopingVlan::new("vlan10", "default")
    };
    assert!(transcoder::validate(&vlan).is_empty());
    assert_eq!(lifecycle::set_lines(&vlan).unwrap().len(), 2);
}

#[test]
fn test_blocks_keep_insertion_order() {
    let output = Output {
        flow_server: Blocks::from(vec![
            flow_server("198.51.100.9", 2055),
            flow_server("192.0.2.1", 2056),
        ]),
        ..Output::default()
    };
    let lines = transcoder::encode(&output, "set x ").unwrap();
    assert_eq!(
        lines,
        vec![
            "set x flow-server \"198.51.100.9\" port 2055",
            "set x flow-server \"192.0.2.1\" port 2056",
        ]
    );
}

#[test]
fn test_encode_is_deterministic() {
    let tree = sampling_instance("samp1", "default");
    let prefix = tree.set_prefix();
    assert_eq!(
        transcoder::encode(&tree, &prefix).unwrap(),
        transcoder::encode(&tree.clone(), &prefix).unwrap()
    );
}

#[test]
fn test_encode_stops_at_first_rule_violation() {
    let mut tree = sampling_instance("samp1", "default");
    let output = tree.family_inet_output.as_mut().unwrap();
    output.inline_jflow_export_rate = Attr::Known(10);
    output.flow_server.push(flow_server("192.0.2.1", 9999));

    let err = transcoder::encode(&tree, &tree.set_prefix()).unwrap_err();
    assert!(matches!(err, TranscodeError::MissingDependency { .. }));

    let all = transcoder::validate(&tree);
    assert_eq!(all.len(), 2);
    assert_eq!(
        all[1].path().unwrap().to_string(),
        "family_inet_output.flow_server[2].hostname"
    );
}

// ============================================================================
// Decode
// ============================================================================

#[test]
fn test_decode_block_lines_with_prefix() {
    let input = lines(&[
        "set foo interface eth0 engine-id 5",
        "set foo interface eth0 engine-type 2",
    ])
    .join("\n");
    let output: Output = transcoder::decode(&input, "set foo ").unwrap();
    assert_eq!(output.interface.len(), 1);
    let eth0 = output.interface.get(0).unwrap();
    assert_eq!(eth0.name, "eth0");
    assert_eq!(eth0.engine_id, Attr::Known(5));
    assert_eq!(eth0.engine_type, Attr::Known(2));
}

#[test]
fn test_unknown_line_inside_block_is_skipped() {
    let input = lines(&[
        "set foo interface eth0 engine-id 5",
        "set foo interface eth0 sampling-knob 7",
        "set foo interface eth0 engine-type 2",
    ])
    .join("\n");
    let output: Output = transcoder::decode(&input, "set foo ").unwrap();
    assert_eq!(output.interface.len(), 1);
    let eth0 = output.interface.get(0).unwrap();
    assert_eq!(eth0.engine_id, Attr::Known(5));
    assert_eq!(eth0.engine_type, Attr::Known(2));
}

#[test]
fn test_unknown_lines_do_not_change_the_tree() {
    let tree = sampling_instance("samp1", "default");
    let prefix = tree.set_prefix();
    let encoded = transcoder::encode(&tree, &prefix).unwrap();

    let clean = relative(&encoded, &prefix);
    let mut noisy_lines = encoded.clone();
    noisy_lines.insert(1, format!("{}family inet output future-knob 1", prefix));
    noisy_lines.insert(0, format!("{}unknown-statement", prefix));
    noisy_lines.push(format!("{}family mpls output hardware-knob", prefix));
    let noisy = relative(&noisy_lines, &prefix);

    let mut from_clean = tree.identity();
    transcoder::decode_into(&mut from_clean, &clean, &prefix).unwrap();
    let mut from_noisy = tree.identity();
    transcoder::decode_into(&mut from_noisy, &noisy, &prefix).unwrap();

    assert_eq!(from_noisy, from_clean);
    assert_eq!(from_clean, tree);
}

#[test]
fn test_decode_twice_gives_equal_trees() {
    let tree = igmp_snooping_vlan("vlan10", "default");
    let prefix = tree.set_prefix();
    let output = relative(&transcoder::encode(&tree, &prefix).unwrap(), &prefix);

    let mut first = tree.identity();
    transcoder::decode_into(&mut first, &output, &prefix).unwrap();
    let mut second = tree.identity();
    transcoder::decode_into(&mut second, &output, &prefix).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, tree);
}

#[test]
fn test_decode_accepts_absolute_lines() {
    let tree = sampling_instance("samp1", "vrf1");
    let prefix = tree.set_prefix();
    let encoded = transcoder::encode(&tree, &prefix).unwrap();

    let mut decoded = tree.identity();
    transcoder::decode_into(&mut decoded, &encoded.join("\n"), &prefix).unwrap();
    assert_eq!(decoded, tree);
}

#[test]
fn test_decode_stops_at_end_marker() {
    let input = "<configuration-output>\nset disable\n</configuration-output>\nset enable\n";
    let tree: LldpInterface = transcoder::decode(input, LLDP_PREFIX).unwrap();
    assert!(tree.disable);
    assert!(!tree.enable);
}

#[test]
fn test_non_numeric_value_fails_naming_the_line() {
    let input = "set family inet output flow-server 192.0.2.1 port http\n";
    let mut tree = SamplingInstance::new("samp1", "default");
    let prefix = tree.set_prefix();
    let err = transcoder::decode_into(&mut tree, input, &prefix).unwrap_err();
    match err {
        TranscodeError::Parse { line, .. } => {
            assert_eq!(line, "set family inet output flow-server 192.0.2.1 port http");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reordered_block_lines_split_blocks() {
    // decode relies on the lines of one block being contiguous
    let input = lines(&[
        "set interface eth0 engine-id 5",
        "set interface eth1 engine-id 6",
        "set interface eth0 engine-type 2",
    ])
    .join("\n");
    let output: Output = transcoder::decode(&input, "").unwrap();
    let names: Vec<&str> = output.interface.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["eth0", "eth1", "eth0"]);
}
