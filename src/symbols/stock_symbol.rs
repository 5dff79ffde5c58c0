// src/symbols/stock_symbol.rs

use crate::symbols::catalog::{CatalogEntry, CatalogIndex};
use once_cell::sync::Lazy;

/// Yahoo Finance-compatible symbols shipped with the crate, paired with display names.
/// Santiago listings carry the `.SN` suffix.
const KNOWN_STOCKS: &[(&str, &str)] = &[
    // US large caps
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc. Class A"),
    ("GOOG", "Alphabet Inc. Class C"),
    ("AMZN", "Amazon.com Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("META", "Meta Platforms Inc."),
    ("TSLA", "Tesla Inc."),
    ("BRK-B", "Berkshire Hathaway Inc. Class B"),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("MA", "Mastercard Incorporated"),
    ("UNH", "UnitedHealth Group Incorporated"),
    ("JNJ", "Johnson & Johnson"),
    ("WMT", "Walmart Inc."),
    ("PG", "Procter & Gamble Company"),
    ("HD", "Home Depot Inc."),
    ("KO", "Coca-Cola Company"),
    ("PEP", "PepsiCo Inc."),
    ("DIS", "Walt Disney Company"),
    ("NFLX", "Netflix Inc."),
    ("ADBE", "Adobe Inc."),
    ("CRM", "Salesforce Inc."),
    ("ORCL", "Oracle Corporation"),
    ("INTC", "Intel Corporation"),
    ("AMD", "Advanced Micro Devices Inc."),
    ("CSCO", "Cisco Systems Inc."),
    ("IBM", "International Business Machines Corporation"),
    ("MS", "Morgan Stanley"),
    ("GS", "Goldman Sachs Group Inc."),
    ("BAC", "Bank of America Corporation"),
    ("AXP", "American Express Company"),
    ("MCD", "McDonald's Corporation"),
    ("NKE", "Nike Inc."),
    ("BA", "Boeing Company"),
    ("CAT", "Caterpillar Inc."),
    ("CVX", "Chevron Corporation"),
    ("XOM", "Exxon Mobil Corporation"),
    ("MRK", "Merck & Co. Inc."),
    ("PFE", "Pfizer Inc."),
    ("AMGN", "Amgen Inc."),
    ("HON", "Honeywell International Inc."),
    ("MMM", "3M Company"),
    ("TRV", "Travelers Companies Inc."),
    ("VZ", "Verizon Communications Inc."),
    ("SHW", "Sherwin-Williams Company"),
    ("DOW", "Dow Inc."),
    // ETFs
    ("SPY", "SPDR S&P 500 ETF Trust"),
    ("QQQ", "Invesco QQQ Trust"),
    ("DIA", "SPDR Dow Jones Industrial Average ETF Trust"),
    ("ECH", "iShares MSCI Chile ETF"),
    // Santiago Stock Exchange
    ("SQM-B.SN", "Sociedad Quimica y Minera de Chile"),
    ("CHILE.SN", "Banco de Chile"),
    ("BSANTANDER.SN", "Banco Santander Chile"),
    ("BCI.SN", "Banco de Credito e Inversiones"),
    ("ITAUCL.SN", "Banco Itau Chile"),
    ("COPEC.SN", "Empresas Copec"),
    ("ENELAM.SN", "Enel Americas"),
    ("ENELCHILE.SN", "Enel Chile"),
    ("FALABELLA.SN", "Falabella"),
    ("CENCOSUD.SN", "Cencosud"),
    ("CENCOMALLS.SN", "Cencosud Shopping"),
    ("CMPC.SN", "Empresas CMPC"),
    ("LTM.SN", "LATAM Airlines Group"),
    ("CCU.SN", "Compania Cervecerias Unidas"),
    ("ANDINA-B.SN", "Embotelladora Andina"),
    ("PARAUCO.SN", "Parque Arauco"),
    ("MALLPLAZA.SN", "Plaza S.A."),
    ("VAPORES.SN", "Compania Sud Americana de Vapores"),
    ("COLBUN.SN", "Colbun"),
    ("AGUAS-A.SN", "Aguas Andinas"),
    ("ENTEL.SN", "Empresa Nacional de Telecomunicaciones"),
    ("CAP.SN", "CAP S.A."),
    ("CONCHATORO.SN", "Vina Concha y Toro"),
    ("SMU.SN", "SMU S.A."),
    ("RIPLEY.SN", "Ripley Corp"),
    ("IAM.SN", "Inversiones Aguas Metropolitanas"),
    ("ECL.SN", "Engie Energia Chile"),
    ("SONDA.SN", "Sonda"),
    ("QUINENCO.SN", "Quinenco"),
    ("ORO-BLANCO.SN", "Sociedad de Inversiones Oro Blanco"),
];

static DEFAULT_CATALOG: Lazy<CatalogIndex> = Lazy::new(|| {
    CatalogIndex::build(
        KNOWN_STOCKS
            .iter()
            .map(|(symbol, name)| CatalogEntry::new(*symbol, *name)),
    )
});

/// Returns the built-in catalog used when no catalog file is configured.
pub fn default_catalog() -> &'static CatalogIndex {
    &DEFAULT_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::validator::FormatValidator;

    #[test]
    fn built_in_symbols_are_unique_and_well_formed() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), KNOWN_STOCKS.len());
        for entry in catalog.iter() {
            assert!(
                FormatValidator::is_valid(&entry.symbol),
                "{} should pass the format check",
                entry.symbol
            );
        }
    }
}
