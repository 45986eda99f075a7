//! `junos_igmp_snooping_vlan`: `[routing-instances "<ri>" ]protocols igmp-snooping vlan "<name>"`.

use super::{
    default_routing_instance, effective_routing_instance, split_name_routing_instance,
    NAME_EXPECTED, NAME_REGEX, ROUTING_INSTANCE_EXPECTED, ROUTING_INSTANCE_REGEX,
};
use crate::error::Result;
use crate::lifecycle::Resource;
use crate::transcoder::line::{int_attr, qualified_path, quote, string_attr};
use crate::transcoder::{
    Attr, AttributePath, Block, Blocks, Checks, Dispatch, Keyword, SetWriter, Transcode,
    TranscodeResult, ID_SEPARATOR,
};
use serde::{Deserialize, Serialize};

/// IGMP snooping options of one VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgmpSnoopingVlan {
    pub name: String,
    pub routing_instance: String,
    pub immediate_leave: bool,
    pub interface: Blocks<SnoopingInterface>,
    pub l2_querier_source_address: Attr<String>,
    pub proxy: bool,
    pub proxy_source_address: Attr<String>,
    pub query_interval: Attr<i64>,
    pub query_last_member_interval: Attr<String>,
    pub query_response_interval: Attr<String>,
    pub robust_count: Attr<i64>,
}

impl Default for IgmpSnoopingVlan {
    fn default() -> Self {
        Self {
            name: String::new(),
            routing_instance: default_routing_instance(),
            immediate_leave: false,
            interface: Blocks::default(),
            l2_querier_source_address: Attr::Unset,
            proxy: false,
            proxy_source_address: Attr::Unset,
            query_interval: Attr::Unset,
            query_last_member_interval: Attr::Unset,
            query_response_interval: Attr::Unset,
            robust_count: Attr::Unset,
        }
    }
}

/// `interface "<name>"` under the VLAN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnoopingInterface {
    pub name: String,
    pub group_limit: Attr<i64>,
    pub host_only_interface: bool,
    pub immediate_leave: bool,
    pub multicast_router_interface: bool,
    pub static_group: Blocks<StaticGroup>,
}

/// `static group "<address>"` under an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticGroup {
    pub address: String,
    pub source: Attr<String>,
}

static VLAN_KEYWORDS: &[Keyword<IgmpSnoopingVlan>] = &[
    Keyword::exact("immediate-leave", |v, _| {
        v.immediate_leave = true;
        Ok(())
    }),
    Keyword::prefix("interface ", |v, rest| v.interface.decode_line(rest)),
    Keyword::prefix("l2-querier source-address ", |v, rest| {
        v.l2_querier_source_address = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("proxy source-address ", |v, rest| {
        v.proxy_source_address = string_attr(rest);
        Ok(())
    }),
    Keyword::exact("proxy", |v, _| {
        v.proxy = true;
        Ok(())
    }),
    Keyword::prefix("query-interval ", |v, rest| {
        v.query_interval = int_attr(rest)?;
        Ok(())
    }),
    Keyword::prefix("query-last-member-interval ", |v, rest| {
        v.query_last_member_interval = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("query-response-interval ", |v, rest| {
        v.query_response_interval = string_attr(rest);
        Ok(())
    }),
    Keyword::prefix("robust-count ", |v, rest| {
        v.robust_count = int_attr(rest)?;
        Ok(())
    }),
];

static INTERFACE_KEYWORDS: &[Keyword<SnoopingInterface>] = &[
    Keyword::prefix("group-limit ", |i, rest| {
        i.group_limit = int_attr(rest)?;
        Ok(())
    }),
    Keyword::exact("host-only-interface", |i, _| {
        i.host_only_interface = true;
        Ok(())
    }),
    Keyword::exact("immediate-leave", |i, _| {
        i.immediate_leave = true;
        Ok(())
    }),
    Keyword::exact("multicast-router-interface", |i, _| {
        i.multicast_router_interface = true;
        Ok(())
    }),
    Keyword::prefix("static group ", |i, rest| i.static_group.decode_line(rest)),
];

static STATIC_GROUP_KEYWORDS: &[Keyword<StaticGroup>] = &[Keyword::prefix("source ", |g, rest| {
    g.source = string_attr(rest);
    Ok(())
})];

impl IgmpSnoopingVlan {
    pub fn new(name: impl Into<String>, routing_instance: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routing_instance: routing_instance.into(),
            ..Self::default()
        }
    }
}

impl Transcode for IgmpSnoopingVlan {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        checks.matches(path, "name", &self.name, &NAME_REGEX, NAME_EXPECTED)?;
        checks.matches(
            path,
            "routing_instance",
            effective_routing_instance(&self.routing_instance),
            &ROUTING_INSTANCE_REGEX,
            ROUTING_INSTANCE_EXPECTED,
        )?;
        checks.requires(
            path,
            "proxy_source_address",
            self.proxy_source_address.is_set(),
            "proxy",
            self.proxy,
        )?;
        checks.quotable(path, "l2_querier_source_address", &self.l2_querier_source_address)?;
        checks.quotable(path, "proxy_source_address", &self.proxy_source_address)?;
        checks.quotable(path, "query_last_member_interval", &self.query_last_member_interval)?;
        checks.quotable(path, "query_response_interval", &self.query_response_interval)?;
        self.interface.check(&path.at_name("interface"), checks)
    }

    fn encode(&self, w: &mut SetWriter<'_>, path: &AttributePath) -> TranscodeResult<()> {
        w.flag("immediate-leave", self.immediate_leave);
        self.interface.encode(w, &path.at_name("interface"))?;
        w.string("l2-querier source-address", &self.l2_querier_source_address);
        w.flag("proxy", self.proxy);
        w.string("proxy source-address", &self.proxy_source_address);
        w.int("query-interval", &self.query_interval);
        w.string("query-last-member-interval", &self.query_last_member_interval);
        w.string("query-response-interval", &self.query_response_interval);
        w.int("robust-count", &self.robust_count);
        Ok(())
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        VLAN_KEYWORDS.dispatch(self, line)
    }
}

impl Transcode for SnoopingInterface {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        checks.conflict(
            path,
            "host_only_interface",
            self.host_only_interface,
            "multicast_router_interface",
            self.multicast_router_interface,
        )?;
        self.static_group.check(&path.at_name("static_group"), checks)
    }

    fn encode(&self, w: &mut SetWriter<'_>, path: &AttributePath) -> TranscodeResult<()> {
        w.int("group-limit", &self.group_limit);
        w.flag("host-only-interface", self.host_only_interface);
        w.flag("immediate-leave", self.immediate_leave);
        w.flag("multicast-router-interface", self.multicast_router_interface);
        self.static_group.encode(w, &path.at_name("static_group"))
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        INTERFACE_KEYWORDS.dispatch(self, line)
    }
}

impl Block for SnoopingInterface {
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

impl Transcode for StaticGroup {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        checks.quotable(path, "source", &self.source)
    }

    fn encode(&self, w: &mut SetWriter<'_>, _path: &AttributePath) -> TranscodeResult<()> {
        w.string("source", &self.source);
        Ok(())
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        STATIC_GROUP_KEYWORDS.dispatch(self, line)
    }
}

impl Block for StaticGroup {
    const KEYWORD: &'static str = "static group";
    const ID_ATTR: &'static str = "address";

    fn identifier(&self) -> &str {
        &self.address
    }

    fn with_identifier(identifier: &str) -> Self {
        Self {
            address: identifier.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for IgmpSnoopingVlan {
    const TYPE_NAME: &'static str = "junos_igmp_snooping_vlan";
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
            &format!("protocols igmp-snooping vlan {}", quote(&self.name)),
        )
    }

    fn routing_instance(&self) -> Option<&str> {
        Some(effective_routing_instance(&self.routing_instance))
    }
}
