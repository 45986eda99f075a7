//! `junos_lldp_interface`: `protocols lldp interface "<name>"`.

use super::{NAME_EXPECTED, NAME_REGEX};
use crate::error::Result;
use crate::lifecycle::Resource;
use crate::transcoder::line::{quote, DELETE_LS};
use crate::transcoder::{
    AttributePath, Checks, Dispatch, Keyword, SetWriter, Transcode, TranscodeResult,
};
use serde::{Deserialize, Serialize};

/// LLDP options of one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LldpInterface {
    pub name: String,
    pub disable: bool,
    pub enable: bool,
    pub power_negotiation_disable: bool,
    pub power_negotiation_enable: bool,
    pub trap_notification_disable: bool,
    pub trap_notification_enable: bool,
}

static KEYWORDS: &[Keyword<LldpInterface>] = &[
    Keyword::exact("disable", |r, _| {
        r.disable = true;
        Ok(())
    }),
    Keyword::exact("enable", |r, _| {
        r.enable = true;
        Ok(())
    }),
    Keyword::exact("power-negotiation disable", |r, _| {
        r.power_negotiation_disable = true;
        Ok(())
    }),
    Keyword::exact("power-negotiation enable", |r, _| {
        r.power_negotiation_enable = true;
        Ok(())
    }),
    Keyword::exact("trap-notification disable", |r, _| {
        r.trap_notification_disable = true;
        Ok(())
    }),
    Keyword::exact("trap-notification enable", |r, _| {
        r.trap_notification_enable = true;
        Ok(())
    }),
];

impl LldpInterface {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Transcode for LldpInterface {
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        checks.matches(path, "name", &self.name, &NAME_REGEX, NAME_EXPECTED)?;
        checks.conflict(path, "disable", self.disable, "enable", self.enable)?;
        checks.conflict(
            path,
            "power_negotiation_disable",
            self.power_negotiation_disable,
            "power_negotiation_enable",
            self.power_negotiation_enable,
        )?;
        checks.conflict(
            path,
            "trap_notification_disable",
            self.trap_notification_disable,
            "trap_notification_enable",
            self.trap_notification_enable,
        )
    }

    fn encode(&self, w: &mut SetWriter<'_>, _path: &AttributePath) -> TranscodeResult<()> {
        w.flag("disable", self.disable);
        w.flag("enable", self.enable);
        w.flag("power-negotiation disable", self.power_negotiation_disable);
        w.flag("power-negotiation enable", self.power_negotiation_enable);
        w.flag("trap-notification disable", self.trap_notification_disable);
        w.flag("trap-notification enable", self.trap_notification_enable);
        Ok(())
    }

    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool> {
        KEYWORDS.dispatch(self, line)
    }
}

impl Resource for LldpInterface {
    const TYPE_NAME: &'static str = "junos_lldp_interface";
    const IMPORT_ID_FORMAT: &'static str = "<name>";

    fn id(&self) -> String {
        self.name.clone()
    }

    fn from_import_id(id: &str) -> Result<Self> {
        Ok(Self::named(id))
    }

    fn identity(&self) -> Self {
        Self::named(self.name.clone())
    }

    fn show_path(&self) -> String {
        format!("protocols lldp interface {}", quote(&self.name))
    }

    fn delete_options_lines(&self) -> Option<Vec<String>> {
        let prefix = format!("{}{} ", DELETE_LS, self.show_path());
        Some(
            ["disable", "enable", "power-negotiation", "trap-notification"]
                .iter()
                .map(|option| format!("{}{}", prefix, option))
                .collect(),
        )
    }
}
