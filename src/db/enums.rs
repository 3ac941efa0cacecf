use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ledger bucket an hour adjustment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// Holiday hours used. Recorded negative.
    TakeHours,
    /// Holiday hours credited in lieu. Recorded positive.
    AddHours,
    /// Certified sick leave used. Recorded negative.
    SickCert,
    /// Uncertified sick leave used. Recorded negative.
    SickUncert,
    Other,
}

impl LedgerKind {
    pub const ALL: [LedgerKind; 5] = [
        LedgerKind::TakeHours,
        LedgerKind::AddHours,
        LedgerKind::SickCert,
        LedgerKind::SickUncert,
        LedgerKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::TakeHours => "take_hours",
            LedgerKind::AddHours => "add_hours",
            LedgerKind::SickCert => "sick_cert",
            LedgerKind::SickUncert => "sick_uncert",
            LedgerKind::Other => "other",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "take_hours" => Ok(LedgerKind::TakeHours),
            "add_hours" => Ok(LedgerKind::AddHours),
            "sick_cert" => Ok(LedgerKind::SickCert),
            "sick_uncert" => Ok(LedgerKind::SickUncert),
            "other" => Ok(LedgerKind::Other),
            _ => Err(format!("Unrecognized ledger kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SickKind {
    Certified,
    Uncertified,
}

impl SickKind {
    pub fn ledger_kind(&self) -> LedgerKind {
        match self {
            SickKind::Certified => LedgerKind::SickCert,
            SickKind::Uncertified => LedgerKind::SickUncert,
        }
    }
}

/// Counties a scheme can be registered in. The prefix seeds scheme app codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum County {
    Carlow,
    Cavan,
    Clare,
    Cork,
    Donegal,
    Dublin,
    Galway,
    Kerry,
    Kildare,
    Kilkenny,
    Laois,
    Leitrim,
    Limerick,
    Longford,
    Louth,
    Mayo,
    Meath,
    Monaghan,
    Offaly,
    Roscommon,
    Sligo,
    Tipperary,
    Waterford,
    Westmeath,
    Wexford,
    Wicklow,
}

impl County {
    pub fn prefix(&self) -> &'static str {
        match self {
            County::Carlow => "CW",
            County::Cavan => "CN",
            County::Clare => "CE",
            County::Cork => "CK",
            County::Donegal => "DL",
            County::Dublin => "DN",
            County::Galway => "GY",
            County::Kerry => "KY",
            County::Kildare => "KE",
            County::Kilkenny => "KK",
            County::Laois => "LS",
            County::Leitrim => "LM",
            County::Limerick => "LK",
            County::Longford => "LD",
            County::Louth => "LH",
            County::Mayo => "MO",
            County::Meath => "MH",
            County::Monaghan => "MN",
            County::Offaly => "OY",
            County::Roscommon => "RN",
            County::Sligo => "SO",
            County::Tipperary => "TY",
            County::Waterford => "WD",
            County::Westmeath => "WH",
            County::Wexford => "WX",
            County::Wicklow => "WW",
        }
    }
}

impl FromStr for County {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let county = match s.trim().to_ascii_lowercase().as_str() {
            "carlow" => County::Carlow,
            "cavan" => County::Cavan,
            "clare" => County::Clare,
            "cork" => County::Cork,
            "donegal" => County::Donegal,
            "dublin" => County::Dublin,
            "galway" => County::Galway,
            "kerry" => County::Kerry,
            "kildare" => County::Kildare,
            "kilkenny" => County::Kilkenny,
            "laois" => County::Laois,
            "leitrim" => County::Leitrim,
            "limerick" => County::Limerick,
            "longford" => County::Longford,
            "louth" => County::Louth,
            "mayo" => County::Mayo,
            "meath" => County::Meath,
            "monaghan" => County::Monaghan,
            "offaly" => County::Offaly,
            "roscommon" => County::Roscommon,
            "sligo" => County::Sligo,
            "tipperary" => County::Tipperary,
            "waterford" => County::Waterford,
            "westmeath" => County::Westmeath,
            "wexford" => County::Wexford,
            "wicklow" => County::Wicklow,
            _ => return Err(format!("Unrecognized county: {}", s)),
        };
        Ok(county)
    }
}
