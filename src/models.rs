//! Table model for the diversity calculator. The types here stay light-weight
//! data holders so the controller and window can focus on presentation: each
//! configured data source is reduced to a name, an optional workbook path,
//! and per-sheet dimensions gathered while the splash screen is up.

use std::fmt;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};
use thiserror::Error;

use crate::config::DataSourceSpec;

/// Failures while building the model from the configured data sources.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The workbook behind a source could not be opened or read.
    #[error("data source '{name}' could not be opened")]
    Workbook {
        name: String,
        #[source]
        source: calamine::XlsxError,
    },
    /// The workbook opened but contains no sheets, so there is nothing to
    /// tabulate for this source.
    #[error("data source '{name}' contains no sheets")]
    EmptyWorkbook { name: String },
}

/// Dimensions of one sheet inside a source workbook.
#[derive(Debug, Clone)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

/// One data source as the table model sees it: the configured identity plus
/// whatever was ingested from its workbook.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    /// Display name from the configuration, preserved in file order.
    pub name: String,
    /// Workbook path when the source is file-backed.
    pub path: Option<PathBuf>,
    /// Optional free-form description from the configuration.
    pub description: Option<String>,
    /// Sheets found in the workbook. Empty for sources without a path.
    pub sheets: Vec<SheetSummary>,
}

impl SourceSummary {
    /// Whether a workbook was actually ingested for this source.
    pub fn is_loaded(&self) -> bool {
        !self.sheets.is_empty()
    }

    /// Total data rows across all sheets of this source.
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.rows).sum()
    }
}

impl fmt::Display for SourceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The model the launcher constructs between the window and the controller.
/// It owns the ingested source summaries and the optional custom age ranges;
/// the construction order relative to the window is the launcher's concern,
/// not this type's.
#[derive(Debug)]
pub struct TableModel {
    sources: Vec<SourceSummary>,
    age_ranges: Option<Vec<String>>,
}

impl TableModel {
    /// Build the model from the configured source list. Sources naming a
    /// workbook file are opened and summarized here, which is the slow step
    /// the splash screen covers; a source without a path is listed as
    /// unloaded. Any ingestion failure aborts construction.
    pub fn load(
        specs: &[DataSourceSpec],
        age_ranges: Option<Vec<String>>,
    ) -> Result<Self, ModelError> {
        let mut sources = Vec::with_capacity(specs.len());
        for spec in specs {
            let sheets = match spec.path() {
                Some(path) => ingest_workbook(spec.name(), path)?,
                None => Vec::new(),
            };
            sources.push(SourceSummary {
                name: spec.name().to_string(),
                path: spec.path().map(Path::to_path_buf),
                description: spec.description().map(str::to_string),
                sheets,
            });
        }

        Ok(Self {
            sources,
            age_ranges,
        })
    }

    /// The ingested sources, in configuration order.
    pub fn sources(&self) -> &[SourceSummary] {
        &self.sources
    }

    /// Names of the sources, in configuration order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    /// The custom age ranges, when the configuration provided them.
    pub fn age_ranges(&self) -> Option<&[String]> {
        self.age_ranges.as_deref()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Open a workbook and record the dimensions of every sheet. A file-backed
/// source must contain at least one sheet.
fn ingest_workbook(name: &str, path: &Path) -> Result<Vec<SheetSummary>, ModelError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| ModelError::Workbook {
        name: name.to_string(),
        source,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(ModelError::EmptyWorkbook {
            name: name.to_string(),
        });
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|source| ModelError::Workbook {
                name: name.to_string(),
                source,
            })?;
        let (rows, columns) = range.get_size();
        sheets.push(SheetSummary {
            name: sheet_name.clone(),
            rows,
            columns,
        });
    }

    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSourceSpec;

    fn named(name: &str) -> DataSourceSpec {
        DataSourceSpec::Name(name.to_string())
    }

    #[test]
    fn pathless_sources_load_as_unloaded() {
        let model = TableModel::load(&[named("A"), named("B")], None).unwrap();
        assert_eq!(model.source_names(), vec!["A", "B"]);
        assert!(model.sources().iter().all(|s| !s.is_loaded()));
        assert!(model.age_ranges().is_none());
    }

    #[test]
    fn age_ranges_pass_through_unchanged() {
        let ranges = vec!["0-17".to_string(), "18-34".to_string()];
        let model = TableModel::load(&[named("A")], Some(ranges.clone())).unwrap();
        assert_eq!(model.age_ranges(), Some(&ranges[..]));
    }

    #[test]
    fn missing_workbook_fails_construction() {
        let spec = DataSourceSpec::Detailed {
            name: "Broken".to_string(),
            path: Some("does/not/exist.xlsx".into()),
            description: None,
        };
        let err = TableModel::load(&[spec], None).unwrap_err();
        assert!(matches!(err, ModelError::Workbook { ref name, .. } if name == "Broken"));
    }

    #[test]
    fn source_totals_sum_sheet_rows() {
        let source = SourceSummary {
            name: "A".to_string(),
            path: None,
            description: None,
            sheets: vec![
                SheetSummary {
                    name: "one".to_string(),
                    rows: 10,
                    columns: 4,
                },
                SheetSummary {
                    name: "two".to_string(),
                    rows: 5,
                    columns: 4,
                },
            ],
        };
        assert!(source.is_loaded());
        assert_eq!(source.total_rows(), 15);
    }
}
