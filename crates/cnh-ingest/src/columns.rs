//! Column lookup tolerant of header renames between form versions.

use crate::csv_table::CsvTable;
use crate::error::{IngestError, Result};

/// A header matched from a list of accepted variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn<'a> {
    pub index: usize,
    /// The alias that matched.
    pub alias: &'a str,
}

/// Tries each alias in order and returns the first one present in the table.
///
/// Fails with [`IngestError::NoMatchingAlias`] naming every alias tried.
pub fn resolve_column<'a>(table: &CsvTable, aliases: &[&'a str]) -> Result<ResolvedColumn<'a>> {
    aliases
        .iter()
        .find_map(|alias| {
            table
                .column_index(alias)
                .map(|index| ResolvedColumn {
                    index,
                    alias: *alias,
                })
        })
        .ok_or_else(|| IngestError::NoMatchingAlias {
            aliases: aliases.iter().map(|alias| (*alias).to_string()).collect(),
            input: table.input.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_table::parse_csv_table;

    fn table(header: &str) -> CsvTable {
        parse_csv_table(format!("{header}\n").as_bytes(), b',', "form.csv").unwrap()
    }

    #[test]
    fn first_alias_wins_when_both_present() {
        let table = table("old,new");
        let resolved = resolve_column(&table, &["new", "old"]).unwrap();
        assert_eq!(resolved, ResolvedColumn { index: 1, alias: "new" });
    }

    #[test]
    fn falls_through_to_later_alias() {
        let table = table("id,Nº Registro da CNH:");
        let resolved = resolve_column(
            &table,
            &["QUESTÃO 1 - Informe o número da CNH:", "Nº Registro da CNH:"],
        )
        .unwrap();
        assert_eq!(resolved.index, 1);
        assert_eq!(resolved.alias, "Nº Registro da CNH:");
    }

    #[test]
    fn no_match_names_all_aliases() {
        let table = table("id,name");
        let err = resolve_column(&table, &["a", "b"]).unwrap_err();
        match err {
            IngestError::NoMatchingAlias { aliases, input } => {
                assert_eq!(aliases, vec!["a", "b"]);
                assert_eq!(input, "form.csv");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
