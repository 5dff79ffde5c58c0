// src/symbols/presets.rs
use serde::Serialize;

/// A named, ordered list of symbols that replaces the selection in one step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndexPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub symbols: &'static [&'static str],
}

impl IndexPreset {
    pub fn symbols(&self) -> Vec<String> {
        self.symbols.iter().map(|s| s.to_string()).collect()
    }
}

const IPSA: &[&str] = &[
    "SQM-B.SN", "CHILE.SN", "BSANTANDER.SN", "BCI.SN", "ITAUCL.SN",
    "COPEC.SN", "ENELAM.SN", "ENELCHILE.SN", "FALABELLA.SN", "CENCOSUD.SN",
    "CENCOMALLS.SN", "CMPC.SN", "LTM.SN", "CCU.SN", "ANDINA-B.SN",
    "PARAUCO.SN", "MALLPLAZA.SN", "VAPORES.SN", "COLBUN.SN", "AGUAS-A.SN",
    "ENTEL.SN", "CAP.SN", "CONCHATORO.SN", "SMU.SN", "RIPLEY.SN",
    "IAM.SN", "ECL.SN", "SONDA.SN", "QUINENCO.SN", "ORO-BLANCO.SN",
];

const DOW30: &[&str] = &[
    "AAPL", "AMGN", "AMZN", "AXP", "BA", "CAT", "CRM", "CSCO", "CVX", "DIS",
    "GS", "HD", "HON", "IBM", "JNJ", "JPM", "KO", "MCD", "MMM", "MRK",
    "MSFT", "NKE", "NVDA", "PG", "SHW", "TRV", "UNH", "V", "VZ", "WMT",
];

/// Symbols offered as one-click quick picks next to the search box.
pub const POPULAR_QUICK_PICKS: &[&str] =
    &["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "JPM"];

pub const PRESETS: &[IndexPreset] = &[
    IndexPreset {
        key: "ipsa",
        label: "S&P IPSA (Chile)",
        symbols: IPSA,
    },
    IndexPreset {
        key: "dow30",
        label: "Dow Jones Industrial Average",
        symbols: DOW30,
    },
    IndexPreset {
        key: "popular",
        label: "Popular stocks",
        symbols: POPULAR_QUICK_PICKS,
    },
];

/// Resolves a preset key (case-insensitive).
pub fn resolve_preset(key: &str) -> Option<&'static IndexPreset> {
    let key = key.trim();
    PRESETS.iter().find(|preset| preset.key.eq_ignore_ascii_case(key))
}
