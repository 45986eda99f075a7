//! `junos_forwardingoptions_sampling_instance`:
//! `[routing-instances "<ri>" ]forwarding-options sampling instance "<name>"`.

use super::{
    default_routing_instance, effective_routing_instance, split_name_routing_instance,
    NAME_EXPECTED, NAME_REGEX, ROUTING_INSTANCE_EXPECTED, ROUTING_INSTANCE_REGEX,
};
use crate::error::Result;
use crate::lifecycle::Resource;
use crate::transcoder::line::{int_attr, qualified_path, quote, string_attr, trim_quotes};
use crate::transcoder::{
    check_optional, decode_optional, encode_optional, Attr, AttributePath, Block, Blocks, Checks,
    Dispatch, Keyword, SetWriter, Transcode, TranscodeResult, ID_SEPARATOR,
};
use serde::{Deserialize, Serialize};

/// A packet sampling instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingInstance {
    pub name: String,
    pub routing_instance: String,
    pub disable: bool,
    pub input: Option<Input>,
    pub family_inet_input: Option<Input>,
    pub family_inet_output: Option<Output>,
    pub family_inet6_input: Option<Input>,
    pub family_inet6_output: Option<Output>,
    pub family_mpls_input: Option<Input>,
    pub family_mpls_output: Option<Output>,
}

impl Default for SamplingInstance {
    fn default() -> Self {
        Self {
            name: String::new(),
            routing_instance: default_routing_instance(),
            disable: false,
            input: None,
            family_inet_input: None,
            family_inet_output: None,
            family_inet6_input: None,
            family_inet6_output: None,
            family_mpls_input: None,
            family_mpls_output: None,
        }
    }
}

/// Sampling rate options (`input` and `family <f> input`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    pub max_packets_per_second: Attr<i64>,
    pub maximum_packet_length: Attr<i64>,
    pub rate: Attr<i64>,
    pub run_length: Attr<i64>,
}

/// Flow export options (`family <f> output`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub aggregate_export_interval: Attr<i64>,
    pub extension_service: Vec<String>,
    pub flow_active_timeout: Attr<i64>,
    pub flow_inactive_timeout: Attr<i64>,
    pub flow_server: Blocks<FlowServer>,
    pub inline_jflow_export_rate: Attr<i64>,
    pub inline_jflow_source_address: Attr<String>,
    pub interface: Blocks<OutputInterface>,
}

/// `flow-server "<hostname>"` collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowServer {
    pub hostname: String,
    pub port: Attr<i64>,
    pub aggregation_autonomous_system: bool,
    pub aggregation_destination_prefix: bool,
    pub autonomous_system_type: Attr<String>,
    pub dscp: Attr<i64>,
    pub forwarding_class: Attr<String>,
    pub local_dump: bool,
    pub no_local_dump: bool,
    pub routing_instance: Attr<String>,
    pub source_address: Attr<String>,
    pub version: Attr<i64>,
    pub version9_template: Attr<String>,
    pub version_ipfix_template: Attr<String>,
}

/// `interface "<name>"` exporting through a services PIC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputInterface {
    pub name: String,
    pub engine_id: Attr<i64>,
    pub engine_type: Attr<i64>,
    pub source_address: Attr<String>,
}

static INSTANCE_KEYWORDS: &[Keyword<SamplingInstance>] = &[
    Keyword::exact("disable", |s, _| {
        s.disable = true;
        Ok(())
    }),
    Keyword::prefix("input ", |s, rest| decode_optional(&mut s.input, rest)),
    Keyword::prefix("family inet input ", |s, rest| {
        decode_optional(&mut s.family_inet_input, rest)
    }),
    Keyword::prefix("family inet output ", |s, rest| {
        decode_optional(&mut s.family_inet_output, rest)
    }),
    Keyword::prefix("family inet6 input ", |s, rest| {
        decode_optional(&mut s.family_inet6_input, rest)
    }),
    Keyword::prefix("family inet6 output ", |s, rest| {
        decode_optional(&mut s.family_inet6_output, rest)
    }),
    Keyword::prefix("family mpls input ", |s, rest| {
        decode_optional(&mut s.family_mpls_input, rest)
    }),
    Keyword::prefix("family mpls output ", |s, rest| {
        decode_optional(&mut s.family_mpls_output, rest)
    }),
];

static INPUT_KEYWORDS: &[Keyword<Input>] = &[
    Keyword::prefix("max-packets-per-second ", |i, rest| {
        i.max_packets_per_second = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("maximum-packet-length ", |i, rest| {
        i.maximum_packet_length = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("rate ", |i, rest| {
        i.rate = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("run-length ", |i, rest| {
        i.run_length = int_attr(rest)?;
        Ok(())
    }),
];

static OUTPUT_KEYWORDS: &[Keyword<Output>] = &[
    Keyword::prefix("aggregate-export-interval ", |o, rest| {
        o.aggregate_export_interval = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("extension-service ", |o, rest| {
        o.extension_service.push(trim_quotes(rest).to_string());
        Ok(())
    }),
    Keyword::prefix("flow-active-timeout ", |o, rest| {
        o.flow_active_timeout = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("flow-inactive-timeout ", |o, rest| {
        o.flow_inactive_timeout = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("flow-server ", |o, rest| o.flow_server.decode_line(rest)),
    Keyword::prefix("inline-jflow export-rate ", |o, rest| {
        o.inline_jflow_export_rate = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("inline-jflow source-address ", |o, rest| {
        o.inline_jflow_source_address = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("interface ", |o, rest| o.interface.decode_line(rest)),
];

static FLOW_SERVER_KEYWORDS: &[Keyword<FlowServer>] = &[
    Keyword::prefix("port ", |f, rest| {
        f.port = int_attr(rest)?;
        Ok(())
    }),
    Keyword::exact("aggregation autonomous-system", |f, _| {
        f.aggregation_autonomous_system = true;
        Ok(())
    }),
    Keyword::exact("aggregation destination-prefix", |f, _| {
        f.aggregation_destination_prefix = true;
        Ok(())
    }),
    Keyword::prefix("autonomous-system-type ", |f, rest| {
        f.autonomous_system_type = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("dscp ", |f, rest| {
        f.dscp = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("forwarding-class ", |f, rest| {
        f.forwarding_class = string_attr(rest);
        Ok(())
    }),
    Keyword::exact("local-dump", |f, _| {
        f.local_dump = true;
        Ok(())
    }),
    Keyword::exact("no-local-dump", |f, _| {
        f.no_local_dump = true;
        Ok(())
    }),
    Keyword::prefix("routing-instance ", |f, rest| {
        f.routing_instance = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("source-address ", |f, rest| {
        f.source_address = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("version9 template ", |f, rest| {
        f.version9_template = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("version-ipfix template ", |f, rest| {
        f.version_ipfix_template = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("version ", |f, rest| {
        f.version = int_attr(rest)?;
        Ok(())
    }),
];

static OUTPUT_INTERFACE_KEYWORDS: &[Keyword<OutputInterface>] = &[
    Keyword::prefix("engine-id ", |i, rest| {
        i.engine_id = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("engine-type ", |i, rest| {
        i.engine_type = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("source-address ", |i, rest| {
        i.source_address = string_attr(rest);
        Ok(())
    }),
];

impl SamplingInstance {
    pub fn new(name: impl Into<String>, routing_instance: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routing_instance: routing_instance.into(),
            ..Self::default()
        }
    }
}

impl Transcode for SamplingInstance {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        checks.matches(path, "name", &self.name, &NAME_REGEX, NAME_EXPECTED)?;
        checks.matches(
            path,
            "routing_instance",
            effective_routing_instance(&self.routing_instance),
            &ROUTING_INSTANCE_REGEX,
            ROUTING_INSTANCE_EXPECTED,
        )?;
        check_optional(self.input.as_ref(), &path.at_name("input"), checks)?;
        check_optional(
            self.family_inet_input.as_ref(),
            &path.at_name("family_inet_input"),
            checks,
        )?;
        check_optional(
            self.family_inet_output.as_ref(),
            &path.at_name("family_inet_output"),
            checks,
        )?;
        check_optional(
            self.family_inet6_input.as_ref(),
            &path.at_name("family_inet6_input"),
            checks,
        )?;
        check_optional(
            self.family_inet6_output.as_ref(),
            &path.at_name("family_inet6_output"),
            checks,
        )?;
        check_optional(
            self.family_mpls_input.as_ref(),
            &path.at_name("family_mpls_input"),
            checks,
        )?;
        check_optional(
            self.family_mpls_output.as_ref(),
            &path.at_name("family_mpls_output"),
            checks,
        )
    }

    fn encode(&self, w: &mut SetWriter<'_>, path: &AttributePath) -> TranscodeResult<()> {
        w.flag("disable", self.disable);
        encode_optional(w, "input", self.input.as_ref(), &path.at_name("input"))?;
        encode_optional(
            w,
            "family inet input",
            self.family_inet_input.as_ref(),
            &path.at_name("family_inet_input"),
        )?;
        encode_optional(
            w,
            "family inet output",
            self.family_inet_output.as_ref(),
            &path.at_name("family_inet_output"),
        )?;
        encode_optional(
            w,
            "family inet6 input",
            self.family_inet6_input.as_ref(),
            &path.at_name("family_inet6_input"),
        )?;
        encode_optional(
            w,
            "family inet6 output",
            self.family_inet6_output.as_ref(),
            &path.at_name("family_inet6_output"),
        )?;
        encode_optional(
            w,
            "family mpls input",
            self.family_mpls_input.as_ref(),
            &path.at_name("family_mpls_input"),
        )?;
        encode_optional(
            w,
            "family mpls output",
            self.family_mpls_output.as_ref(),
            &path.at_name("family_mpls_output"),
        )
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        INSTANCE_KEYWORDS.dispatch(self, line)
    }
}

impl Input {
    pub fn is_empty(&self) -> bool {
        !self.max_packets_per_second.is_set()
            && !self.maximum_packet_length.is_set()
            && !self.rate.is_set()
            && !self.run_length.is_set()
    }
}

impl Transcode for Input {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        let block = path.last_name().unwrap_or("input");
        checks.non_empty(path, block, self.is_empty())
    }

    fn encode(&self, w: &mut SetWriter<'_>, _path: &AttributePath) -> TranscodeResult<()> {
        w.int("max-packets-per-second", &self.max_packets_per_second);
        w.int("maximum-packet-length", &self.maximum_packet_length);
        w.int("rate", &self.rate);
        w.int("run-length", &self.run_length);
        Ok(())
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        INPUT_KEYWORDS.dispatch(self, line)
    }
}

impl Output {
    pub fn is_empty(&self) -> bool {
        !self.aggregate_export_interval.is_set()
            && self.extension_service.is_empty()
            && !self.flow_active_timeout.is_set()
            && !self.flow_inactive_timeout.is_set()
            && self.flow_server.is_empty()
            && !self.inline_jflow_export_rate.is_set()
            && !self.inline_jflow_source_address.is_set()
            && self.interface.is_empty()
    }
}

impl Transcode for Output {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        let block = path.last_name().unwrap_or("output");
        checks.non_empty(path, block, self.is_empty())?;
        checks.requires(
            path,
            "inline_jflow_export_rate",
            self.inline_jflow_export_rate.is_set(),
            "inline_jflow_source_address",
            self.inline_jflow_source_address.is_set(),
        )?;
        checks.conflict(
            path,
            "interface",
            !self.interface.is_empty(),
            "inline_jflow_source_address",
            self.inline_jflow_source_address.is_set(),
        )?;
        checks.quotable_all(path, "extension_service", &self.extension_service)?;
        checks.quotable(
            path,
            "inline_jflow_source_address",
            &self.inline_jflow_source_address,
        )?;
        self.flow_server.check(&path.at_name("flow_server"), checks)?;
        self.interface.check(&path.at_name("interface"), checks)
    }

    fn encode(&self, w: &mut SetWriter<'_>, path: &AttributePath) -> TranscodeResult<()> {
        w.int("aggregate-export-interval", &self.aggregate_export_interval);
        w.strings("extension-service", &self.extension_service);
        w.int("flow-active-timeout", &self.flow_active_timeout);
        w.int("flow-inactive-timeout", &self.flow_inactive_timeout);
        self.flow_server.encode(w, &path.at_name("flow_server"))?;
        w.int("inline-jflow export-rate", &self.inline_jflow_export_rate);
        w.string("inline-jflow source-address", &self.inline_jflow_source_address);
        self.interface.encode(w, &path.at_name("interface"))
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        OUTPUT_KEYWORDS.dispatch(self, line)
    }
}

impl Transcode for FlowServer {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        checks.requires(path, "hostname", true, "port", !self.port.is_unset())?;
        checks.conflict(
            path,
            "local_dump",
            self.local_dump,
            "no_local_dump",
            self.no_local_dump,
        )?;
        checks.conflict(
            path,
            "version9_template",
            self.version9_template.is_set(),
            "version_ipfix_template",
            self.version_ipfix_template.is_set(),
        )?;
        checks.quotable(path, "autonomous_system_type", &self.autonomous_system_type)?;
        checks.quotable(path, "forwarding_class", &self.forwarding_class)?;
        checks.quotable(path, "routing_instance", &self.routing_instance)?;
        checks.quotable(path, "source_address", &self.source_address)?;
        checks.quotable(path, "version9_template", &self.version9_template)?;
        checks.quotable(path, "version_ipfix_template", &self.version_ipfix_template)
    }

    fn encode(&self, w: &mut SetWriter<'_>, _path: &AttributePath) -> TranscodeResult<()> {
        w.int("port", &self.port);
        w.flag("aggregation autonomous-system", self.aggregation_autonomous_system);
        w.flag("aggregation destination-prefix", self.aggregation_destination_prefix);
        w.string("autonomous-system-type", &self.autonomous_system_type);
        w.int("dscp", &self.dscp);
        w.string("forwarding-class", &self.forwarding_class);
        w.flag("local-dump", self.local_dump);
        w.flag("no-local-dump", self.no_local_dump);
        w.string("routing-instance", &self.routing_instance);
        w.string("source-address", &self.source_address);
        w.int("version", &self.version);
        w.string("version9 template", &self.version9_template);
        w.string("version-ipfix template", &self.version_ipfix_template);
        Ok(())
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        FLOW_SERVER_KEYWORDS.dispatch(self, line)
    }
}

impl Block for FlowServer {
    const KEYWORD: &'static str = "flow-server";
    const ID_ATTR: &'static str = "hostname";

    fn identifier(&self) -> &str {
        &self.hostname
    }

    fn with_identifier(identifier: &str) -> Self {
        Self {
            hostname: identifier.to_string(),
            ..Self::default()
        }
    }
}

impl Transcode for OutputInterface {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        checks.quotable(path, "source_address", &self.source_address)
    }

    fn encode(&self, w: &mut SetWriter<'_>, _path: &AttributePath) -> TranscodeResult<()> {
        w.int("engine-id", &self.engine_id);
        w.int("engine-type", &self.engine_type);
        w.string("source-address", &self.source_address);
        Ok(())
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        OUTPUT_INTERFACE_KEYWORDS.dispatch(self, line)
    }
}

impl Block for OutputInterface {
    const KEYWORD: &'static str = "interface";
    const ID_ATTR: &'static str = "name";

    fn identifier(&self) -> &str {
        &self.name
    }

    fn with_identifier(identifier: &str) -> Self {
        Self {
            name: identifier.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for SamplingInstance {
    const TYPE_NAME: &'static str = "junos_forwardingoptions_sampling_instance";
    const IMPORT_ID_FORMAT: &'static str = "<name>_-_<routing_instance>";

    fn id(&self) -> String {
        format!(
            "{}{}{}",
            self.name,
            ID_SEPARATOR,
            effective_routing_instance(&self.routing_instance)
        )
    }

    fn from_import_id(id: &str) -> Result<Self> {
        let (name, routing_instance) = split_name_routing_instance(id, Self::IMPORT_ID_FORMAT)?;
        Ok(Self::new(name, routing_instance))
    }

    fn identity(&self) -> Self {
        Self::new(self.name.clone(), self.routing_instance.clone())
    }

    fn show_path(&self) -> String {
        qualified_path(
            &self.routing_instance,
            &format!("forwarding-options sampling instance {}", quote(&self.name)),
        )
    }

    fn routing_instance(&self) -> Option<&str> {
        Some(effective_routing_instance(&self.routing_instance))
    }
}
