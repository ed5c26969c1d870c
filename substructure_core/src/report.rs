//! # Quantity Report (PDF)
//!
//! Renders the quantity summary to a printable PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via placeholder replacement before compilation
//! - Only fonts bundled with `typst-assets` are used, loaded once per process
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use substructure_core::model::SubstructureModel;
//! use substructure_core::params::SubstructureParams;
//! use substructure_core::report::render_quantity_pdf;
//!
//! let mut model = SubstructureModel::new(SubstructureParams::default()).unwrap();
//! let summary = model.quantities().clone();
//! let pdf = render_quantity_pdf(model.params(), &summary, "Jane Engineer", "26-014").unwrap();
//! std::fs::write("quantities.pdf", pdf).unwrap();
//! ```

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{GeometryError, GeometryResult};
use crate::params::{ColumnShape, CurveDirection, SubstructureParams};
use crate::quantities::QuantitySummary;
use crate::units::format_2dp;

// ============================================================================
// Typst World Implementation
// ============================================================================

static BUNDLED_FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data.to_vec())))
        .collect()
});

static FONT_BOOK: Lazy<LazyHash<FontBook>> =
    Lazy::new(|| LazyHash::new(FontBook::from_fonts(BUNDLED_FONTS.iter())));

/// One in-memory report source; no files, no packages.
struct ReportWorld {
    main: Source,
    library: LazyHash<Library>,
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &FONT_BOOK
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        BUNDLED_FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let today = Utc::now().date_naive();
        Datetime::from_ymd(today.year(), u8::try_from(today.month()).ok()?, u8::try_from(today.day()).ok()?)
    }
}

// ============================================================================
// Template
// ============================================================================

const QUANTITY_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 1in, bottom: 1in, left: 0.8in, right: 0.8in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Bridge Substructure Quantities]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "DejaVu Sans Mono", size: 9pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[Substructure Quantity Report]
    #v(4pt)
    #text(size: 11pt)[{{STATION_COUNT}} piers, {{ALIGNMENT}}]
  ]
]

#v(8pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Designer:], [{{DESIGNER}}],
  [Job ID:], [{{JOB_ID}}],
  [Date:], [{{DATE}}],
)

== Parameters

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
{{PARAM_ROWS}}
)

== Quantities per Pier

#table(
  columns: (auto, 1fr, 1fr, auto, 1fr, 1fr, 1fr),
  inset: 6pt,
  stroke: 0.5pt,
  align: (center, right, right, right, right, right, right),
  table.header(
    [*Pier*], [*Elev. (in)*], [*Col. H (in)*], [*Piles*],
    [*Pile cap (ft#super[3])*], [*Columns (ft#super[3])*], [*Pier cap (ft#super[3])*],
  ),
{{STATION_ROWS}}
)

== Totals

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Item*], [*Quantity*], [*Unit*]),
  [Piles], [{{TOTAL_PILES}}], [ea],
  [Pile length], [{{TOTAL_PILE_LENGTH}}], [in],
  [Columns], [{{TOTAL_COLUMNS}}], [ea],
  [Pile cap concrete], [{{TOTAL_PILE_CAP}}], [ft#super[3]],
  [Column concrete], [{{TOTAL_COLUMN}}], [ft#super[3]],
  [Pier cap concrete], [{{TOTAL_PIER_CAP}}], [ft#super[3]],
  [*Total concrete*], [*{{TOTAL_CONCRETE}}*], [ft#super[3]],
  [], [{{TOTAL_CONCRETE_CUYD}}], [yd#super[3]],
)

{{WARNINGS}}

#v(16pt)
#text(size: 8pt, fill: gray)[
  Cap volumes are gross boxes; pier-cap taper and curve skew are not deducted. \
  Quantities are for estimating only and must be verified before use.
]
"##;

// ============================================================================
// Rendering
// ============================================================================

/// Render the quantity summary to PDF bytes.
///
/// # Arguments
///
/// * `params` - The parameters the summary was computed from
/// * `summary` - Per-station and total quantities
/// * `designer` - Name printed in the title block
/// * `job_id` - Job/project number
pub fn render_quantity_pdf(
    params: &SubstructureParams,
    summary: &QuantitySummary,
    designer: &str,
    job_id: &str,
) -> GeometryResult<Vec<u8>> {
    let source = build_source(params, summary, designer, job_id);

    let world = ReportWorld {
        main: Source::detached(source),
        library: LazyHash::new(Library::default()),
    };
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        GeometryError::report(format!("Typst compilation failed: {}", msgs.join("; ")))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        GeometryError::report(format!("PDF rendering failed: {}", msgs.join("; ")))
    })?;

    tracing::info!(bytes = pdf_bytes.len(), "quantity report rendered");
    Ok(pdf_bytes)
}

fn build_source(params: &SubstructureParams, summary: &QuantitySummary, designer: &str, job_id: &str) -> String {
    let alignment = if params.use_curve {
        format!(
            "{} curve R = {} in",
            match params.curve_direction {
                CurveDirection::Left => "left",
                CurveDirection::Right => "right",
            },
            format_2dp(params.curve_radius_in)
        )
    } else {
        "straight alignment".to_string()
    };

    QUANTITY_TEMPLATE
        .replace("{{DESIGNER}}", &escape_typst(designer))
        .replace("{{JOB_ID}}", &escape_typst(job_id))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{STATION_COUNT}}", &summary.stations.len().to_string())
        .replace("{{ALIGNMENT}}", &alignment)
        .replace("{{PARAM_ROWS}}", &build_param_rows(params))
        .replace("{{STATION_ROWS}}", &build_station_rows(summary))
        .replace("{{TOTAL_PILES}}", &summary.total_piles.to_string())
        .replace("{{TOTAL_PILE_LENGTH}}", &format_2dp(summary.total_pile_length.0))
        .replace("{{TOTAL_COLUMNS}}", &summary.total_columns.to_string())
        .replace("{{TOTAL_PILE_CAP}}", &format_2dp(summary.total_pile_cap_volume.0))
        .replace("{{TOTAL_COLUMN}}", &format_2dp(summary.total_column_volume.0))
        .replace("{{TOTAL_PIER_CAP}}", &format_2dp(summary.total_pier_cap_volume.0))
        .replace("{{TOTAL_CONCRETE}}", &format_2dp(summary.total_concrete_volume().0))
        .replace("{{TOTAL_CONCRETE_CUYD}}", &format_2dp(summary.total_concrete_cuyd().0))
        .replace("{{WARNINGS}}", &build_warnings(summary))
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn build_param_rows(p: &SubstructureParams) -> String {
    let shape = match p.column_shape {
        ColumnShape::Rectangular => "rectangular",
        ColumnShape::Circular => "circular",
    };
    let rows: Vec<(&str, String, &str)> = vec![
        ("Spans", p.span_count.to_string(), ""),
        ("Span length", format_2dp(p.span_length_in), "in"),
        ("Road slope", format!("{:.4}", p.road_slope), "in/in"),
        ("Pile grid", format!("{} x {}", p.pile_rows_length, p.pile_rows_width), "rows"),
        ("Pile diameter", format_2dp(p.pile_diameter_in), "in"),
        ("Pile spacing (clear)", format_2dp(p.pile_spacing_in), "in"),
        ("Pile length", format_2dp(p.pile_length_in), "in"),
        ("Pile cap thickness", format_2dp(p.pile_cap_thickness_in), "in"),
        ("Columns", format!("{} {}", p.column_count, shape), ""),
        ("Column spacing", format_2dp(p.column_spacing_in), "in"),
        ("Column height", format_2dp(p.column_height_in), "in"),
        ("Pier cap width", format_2dp(p.pier_cap_width_in), "in"),
        ("Pier cap length", format_2dp(p.pier_cap_length_in), "in"),
        ("Pier cap thickness", format_2dp(p.pier_cap_thickness_in), "in"),
    ];
    rows.iter()
        .map(|(name, value, unit)| format!("  [{}], [{}], [{}],", name, value, unit))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_station_rows(summary: &QuantitySummary) -> String {
    summary
        .stations
        .iter()
        .map(|s| {
            format!(
                "  [{}], [{}], [{}], [{}], [{}], [{}], [{}],",
                s.index + 1,
                format_2dp(s.elevation_in),
                format_2dp(s.column_height_in),
                s.pile_count,
                format_2dp(s.pile_cap_volume.0),
                format_2dp(s.column_volume.0),
                format_2dp(s.pier_cap_volume.0),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_warnings(summary: &QuantitySummary) -> String {
    if summary.warnings.is_empty() {
        return String::new();
    }
    let items: Vec<String> = summary
        .warnings
        .iter()
        .map(|w| format!("- {}", escape_typst(w)))
        .collect();
    format!("== Warnings\n\n{}\n", items.join("\n"))
}
