use crate::error::RenderError;
use crate::layout::{document_title, plot_points, stats_line, value_range, Frame, RiskSplit};
use crate::DocumentRenderer;
use analytics::{SensorReport, Thresholds};
use core_types::{Field, SensorKind};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 7.0;

const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const GREY: (f32, f32, f32) = (0.6, 0.6, 0.6);
const SAFE: (f32, f32, f32) = (0.30, 0.69, 0.31);
const CRITICAL: (f32, f32, f32) = (0.90, 0.22, 0.21);
const SERIES: (f32, f32, f32) = (0.13, 0.59, 0.95);

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn pdf_error(e: impl std::fmt::Debug) -> RenderError {
    RenderError::Pdf(format!("{e:?}"))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Renders reports as A4 PDF documents.
///
/// The first page carries the title, generation time and one statistics line
/// per field. Each field then gets its own page with a safe/critical bar and a
/// line chart of the sampled series.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer {}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw_summary(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        title: &str,
        kind: SensorKind,
        report: &SensorReport,
    ) {
        let mut y = PAGE_HEIGHT - MARGIN;
        layer.use_text(title, 18.0, Mm(MARGIN), Mm(y), &fonts.bold);

        y -= LINE_HEIGHT * 1.5;
        let generated = chrono::Local::now().format("%d/%m/%Y %H:%M:%S");
        layer.use_text(
            format!("Generated: {generated}"),
            10.0,
            Mm(MARGIN),
            Mm(y),
            &fonts.regular,
        );

        y -= LINE_HEIGHT * 2.0;
        layer.use_text("Statistics", 14.0, Mm(MARGIN), Mm(y), &fonts.bold);
        for field in kind.fields() {
            let Some(stats) = report.stats.get(field) else {
                continue;
            };
            y -= LINE_HEIGHT;
            let line = stats_line(*field, stats, report.risk.get(field));
            layer.use_text(line, 11.0, Mm(MARGIN), Mm(y), &fonts.regular);
        }

        y -= LINE_HEIGHT * 1.5;
        layer.use_text(
            format!("Total records: {}", report.count),
            11.0,
            Mm(MARGIN),
            Mm(y),
            &fonts.bold,
        );
    }

    fn draw_risk_bar(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        frame: Frame,
        split: RiskSplit,
    ) {
        let safe_width = frame.width * split.safe_share() as f32;

        if safe_width > 0.0 {
            layer.set_fill_color(rgb(SAFE));
            layer.add_rect(Rect::new(
                Mm(frame.x),
                Mm(frame.y),
                Mm(frame.x + safe_width),
                Mm(frame.top()),
            ));
        }
        if safe_width < frame.width {
            layer.set_fill_color(rgb(CRITICAL));
            layer.add_rect(Rect::new(
                Mm(frame.x + safe_width),
                Mm(frame.y),
                Mm(frame.right()),
                Mm(frame.top()),
            ));
        }

        layer.set_fill_color(rgb(BLACK));
        let total = split.total().max(1) as f64;
        layer.use_text(
            format!(
                "Safe: {} ({:.1}%)   Critical: {} ({:.1}%)",
                split.safe,
                split.safe as f64 * 100.0 / total,
                split.critical,
                split.critical as f64 * 100.0 / total,
            ),
            10.0,
            Mm(frame.x),
            Mm(frame.y - LINE_HEIGHT),
            &fonts.regular,
        );
    }

    fn draw_line_chart(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        frame: Frame,
        report: &SensorReport,
        field: Field,
        threshold: Option<f64>,
    ) {
        let values = report.series_values(field);

        // Axes
        layer.set_outline_color(rgb(GREY));
        layer.set_outline_thickness(0.5);
        layer.add_line(polyline(&[
            (frame.x, frame.top()),
            (frame.x, frame.y),
            (frame.right(), frame.y),
        ]));

        let Some((min, max)) = value_range(&values) else {
            layer.use_text(
                "No samples in this period",
                10.0,
                Mm(frame.x + 5.0),
                Mm(frame.y + frame.height / 2.0),
                &fonts.regular,
            );
            return;
        };

        layer.set_outline_color(rgb(SERIES));
        layer.set_fill_color(rgb(SERIES));
        layer.set_outline_thickness(1.2);
        let points = plot_points(&values, frame);
        if points.len() > 1 {
            layer.add_line(polyline(&points));
        }
        for &(x, y) in &points {
            layer.add_rect(Rect::new(Mm(x - 0.8), Mm(y - 0.8), Mm(x + 0.8), Mm(y + 0.8)));
        }

        layer.set_fill_color(rgb(BLACK));
        layer.use_text(
            format!("max {max:.2}"),
            8.0,
            Mm(frame.x + 1.0),
            Mm(frame.top() + 2.0),
            &fonts.regular,
        );
        layer.use_text(
            format!("min {min:.2}"),
            8.0,
            Mm(frame.x + 1.0),
            Mm(frame.y - 4.0),
            &fonts.regular,
        );

        if let Some(series) = report.series.get(&field) {
            if let (Some(first), Some(last)) = (series.first(), series.last()) {
                let span = format!(
                    "{}  to  {}",
                    first.x.format("%d/%m/%Y %H:%M"),
                    last.x.format("%d/%m/%Y %H:%M")
                );
                layer.use_text(span, 8.0, Mm(frame.x), Mm(frame.y - 9.0), &fonts.regular);
            }
        }

        if let Some(threshold) = threshold {
            layer.use_text(
                format!("threshold {threshold:.2}"),
                8.0,
                Mm(frame.right() - 30.0),
                Mm(frame.top() + 2.0),
                &fonts.regular,
            );
        }
    }
}

fn polyline(points: &[(f32, f32)]) -> Line {
    Line {
        points: points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect(),
        is_closed: false,
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(
        &self,
        kind: SensorKind,
        report: &SensorReport,
        thresholds: Option<&Thresholds>,
    ) -> Result<Vec<u8>, RenderError> {
        if report.count == 0 {
            return Err(RenderError::EmptyReport(report.label.clone()));
        }

        let title = document_title(kind, &report.label);
        let (doc, page, layer) =
            PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Summary");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
        };

        let summary = doc.get_page(page).get_layer(layer);
        self.draw_summary(&summary, &fonts, &title, kind, report);

        for &field in kind.fields() {
            let threshold = thresholds.and_then(|t| t.get(&field).copied());
            let values = report.series_values(field);

            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), field.label());
            let canvas = doc.get_page(page).get_layer(layer);

            let mut y = PAGE_HEIGHT - MARGIN;
            let heading = format!("{} ({})", field.label(), report.label.replace('\u{2013}', "-"));
            canvas.use_text(heading, 14.0, Mm(MARGIN), Mm(y), &fonts.bold);

            y -= LINE_HEIGHT * 2.0;
            canvas.use_text("Safe vs critical", 11.0, Mm(MARGIN), Mm(y), &fonts.regular);
            let bar = Frame::new(MARGIN, y - 16.0, PAGE_WIDTH - 2.0 * MARGIN, 10.0);
            self.draw_risk_bar(&canvas, &fonts, bar, RiskSplit::of(&values, threshold));

            y = bar.y - LINE_HEIGHT * 3.0;
            canvas.use_text("Sampled series", 11.0, Mm(MARGIN), Mm(y), &fonts.regular);
            let chart = Frame::new(MARGIN, y - 110.0, PAGE_WIDTH - 2.0 * MARGIN, 95.0);
            self.draw_line_chart(&canvas, &fonts, chart, report, field, threshold);
        }

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;
        tracing::debug!(
            sensor = %kind,
            label = %report.label,
            bytes = bytes.len(),
            "Rendered PDF report."
        );
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}
