//! Resource types.
//!
//! Each resource is an attribute tree implementing [`Transcode`] for its
//! configuration lines and [`Resource`] for its place in the configuration.
//!
//! [`Transcode`]: crate::transcoder::Transcode
//! [`Resource`]: crate::lifecycle::Resource

pub mod igmp_snooping_vlan;
pub mod lldp_interface;
pub mod sampling_instance;

pub use igmp_snooping_vlan::{IgmpSnoopingVlan, SnoopingInterface, StaticGroup};
pub use lldp_interface::LldpInterface;
pub use sampling_instance::{FlowServer, Input, Output, OutputInterface, SamplingInstance};

use crate::error::{Error, Result};
use crate::transcoder::{line::DEFAULT_ROUTING_INSTANCE, ID_SEPARATOR};
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Object names: no whitespace, no quotes.
pub(crate) static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s"]+$"#).expect("Invalid name regex"));

/// Routing instance names.
pub(crate) static ROUTING_INSTANCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,127}$").expect("Invalid routing instance regex")
});

pub(crate) const NAME_EXPECTED: &str = "a name without spaces or quotes";
pub(crate) const ROUTING_INSTANCE_EXPECTED: &str = "a valid routing instance name";

pub(crate) fn default_routing_instance() -> String {
    DEFAULT_ROUTING_INSTANCE.to_string()
}

/// Routing instance, with empty meaning the default instance.
pub(crate) fn effective_routing_instance(routing_instance: &str) -> &str {
    if routing_instance.is_empty() {
        DEFAULT_ROUTING_INSTANCE
    } else {
        routing_instance
    }
}

/// Split a `<name>_-_<routing_instance>` id.
pub(crate) fn split_name_routing_instance(id: &str, format: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
    match parts.as_slice() {
        [name, routing_instance] if !name.is_empty() && !routing_instance.is_empty() => {
            Ok((name.to_string(), routing_instance.to_string()))
        }
        _ => Err(Error::invalid_id(
            id,
            format!(
                "missing element(s) in id with separator {} (id must be {})",
                ID_SEPARATOR, format
            ),
        )),
    }
}

/// Resource types known to the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    /// junos_forwardingoptions_sampling_instance
    #[value(name = "junos_forwardingoptions_sampling_instance", alias = "sampling-instance")]
    SamplingInstance,
    /// junos_igmp_snooping_vlan
    #[value(name = "junos_igmp_snooping_vlan", alias = "igmp-snooping-vlan")]
    IgmpSnoopingVlan,
    /// junos_lldp_interface
    #[value(name = "junos_lldp_interface", alias = "lldp-interface")]
    LldpInterface,
}

impl ResourceKind {
    pub fn type_name(&self) -> &'static str {
        use crate::lifecycle::Resource;
        match self {
            ResourceKind::SamplingInstance => SamplingInstance::TYPE_NAME,
            ResourceKind::IgmpSnoopingVlan => IgmpSnoopingVlan::TYPE_NAME,
            ResourceKind::LldpInterface => LldpInterface::TYPE_NAME,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
