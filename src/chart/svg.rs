use kurbo::{BezPath, Rect};

use crate::{
    chart::{
        annotate::{Annotation, Placement, cagr_annotations, value_annotations},
        scale::{Extent, PlotFrame, format_tick, nice_step, ticks},
    },
    foundation::error::{CagrError, CagrResult},
    series::calc::GrowthSeries,
};

const MIN_CANVAS: u32 = 300;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Styling for the two-panel comparison chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOpts {
    /// Canvas width in px.
    pub width: u32,
    /// Canvas height in px; split evenly between the panels.
    pub height: u32,
    /// Label every `annotation_step`-th point.
    pub annotate: bool,
    /// Draw minor grid lines between major ticks.
    pub minor_grid: bool,
    /// Dash the major grid.
    pub dashed_grid: bool,
    /// Stroke for the with-interest series.
    pub with_color: String,
    /// Stroke for the without-interest series.
    pub without_color: String,
    /// CSS font-family for all text.
    pub font_family: String,
}

impl Default for ChartOpts {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1200,
            annotate: true,
            minor_grid: true,
            dashed_grid: true,
            with_color: "blue".to_string(),
            without_color: "red".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }
}

impl ChartOpts {
    /// Solid major grid, no minor grid, no annotations.
    pub fn plain() -> Self {
        Self {
            annotate: false,
            minor_grid: false,
            dashed_grid: false,
            ..Self::default()
        }
    }

    /// Reject canvases too small to lay out both panels.
    pub fn validate(&self) -> CagrResult<()> {
        if self.width < MIN_CANVAS || self.height < MIN_CANVAS {
            return Err(CagrError::invalid_input(format!(
                "chart canvas must be at least {MIN_CANVAS}x{MIN_CANVAS}, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

struct Line<'a> {
    label: &'a str,
    color: &'a str,
    values: Vec<f64>,
}

struct Panel<'a> {
    title: &'a str,
    y_label: &'a str,
    lines: [Line<'a>; 2],
    annotations: Vec<Annotation>,
}

/// Render both panels (values on top, CAGR below) as a standalone SVG document.
pub fn render_svg(series: &GrowthSeries, opts: &ChartOpts) -> CagrResult<String> {
    opts.validate()?;
    if series.is_empty() {
        return Err(CagrError::invalid_input("cannot chart an empty series"));
    }
    series.validate()?;

    let years: Vec<f64> = series.years.iter().map(|&y| f64::from(y)).collect();
    let value_panel = Panel {
        title: "Value Growth Over Time",
        y_label: "Value",
        lines: [
            Line {
                label: "With Interest",
                color: &opts.with_color,
                values: series.with_interest.iter().map(|&v| f64::from(v)).collect(),
            },
            Line {
                label: "Without Interest",
                color: &opts.without_color,
                values: series
                    .without_interest
                    .iter()
                    .map(|&v| f64::from(v))
                    .collect(),
            },
        ],
        annotations: if opts.annotate {
            value_annotations(series)
        } else {
            Vec::new()
        },
    };
    let cagr_panel = Panel {
        title: "Compound Annual Growth Rate (CAGR) Over Time",
        y_label: "CAGR",
        lines: [
            Line {
                label: "CAGR With Interest",
                color: &opts.with_color,
                values: series.with_interest_cagr.clone(),
            },
            Line {
                label: "CAGR Without Interest",
                color: &opts.without_color,
                values: series.without_interest_cagr.clone(),
            },
        ],
        annotations: if opts.annotate {
            cagr_annotations(series)
        } else {
            Vec::new()
        },
    };

    let w = f64::from(opts.width);
    let panel_h = f64::from(opts.height) / 2.0;

    let mut out = String::with_capacity(16 * 1024);
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" font-family=\"{}\">\n",
        opts.width,
        opts.height,
        opts.width,
        opts.height,
        escape_xml(&opts.font_family)
    ));
    out.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
        opts.width, opts.height
    ));

    for (i, panel) in [value_panel, cagr_panel].iter().enumerate() {
        let top = panel_h * i as f64;
        let area = Rect::new(
            MARGIN_LEFT,
            top + MARGIN_TOP,
            w - MARGIN_RIGHT,
            top + panel_h - MARGIN_BOTTOM,
        );
        write_panel(&mut out, area, &years, panel, opts)?;
    }

    out.push_str("</svg>\n");
    tracing::debug!(
        bytes = out.len(),
        years = series.len(),
        annotate = opts.annotate,
        "built chart svg"
    );
    Ok(out)
}

fn write_panel(
    out: &mut String,
    area: Rect,
    years: &[f64],
    panel: &Panel<'_>,
    opts: &ChartOpts,
) -> CagrResult<()> {
    let x_data = Extent::of_finite(years.iter().copied())
        .ok_or_else(|| CagrError::render("no finite year values"))?;
    let y_data = Extent::of_finite(
        panel
            .lines
            .iter()
            .flat_map(|l| l.values.iter().copied()),
    )
    .unwrap_or(Extent { min: 0.0, max: 0.0 });
    let frame = PlotFrame::new(area, x_data.padded(0.05), y_data.padded(0.05))?;

    let x_step = nice_step(frame.x.span(), 10).max(1.0);
    let y_step = nice_step(frame.y.span(), 8);
    let x_ticks = ticks(frame.x, x_step);
    let y_ticks = ticks(frame.y, y_step);

    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"white\" stroke=\"black\" stroke-width=\"1\"/>\n",
        area.x0,
        area.y0,
        area.width(),
        area.height()
    ));

    if opts.minor_grid {
        let minor = "stroke=\"#dddddd\" stroke-width=\"0.3\"";
        for x in minor_ticks(frame.x, x_step) {
            vline(out, &frame, x, minor);
        }
        for y in minor_ticks(frame.y, y_step) {
            hline(out, &frame, y, minor);
        }
    }
    let major = if opts.dashed_grid {
        "stroke=\"#b0b0b0\" stroke-width=\"0.5\" stroke-dasharray=\"4 3\""
    } else {
        "stroke=\"#b0b0b0\" stroke-width=\"0.8\""
    };
    for &x in &x_ticks {
        vline(out, &frame, x, major);
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" text-anchor=\"middle\">{}</text>\n",
            frame.map_x(x),
            area.y1 + 18.0,
            format_tick(x, x_step)
        ));
    }
    for &y in &y_ticks {
        hline(out, &frame, y, major);
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" text-anchor=\"end\">{}</text>\n",
            area.x0 - 6.0,
            frame.map_y(y) + 4.0,
            format_tick(y, y_step)
        ));
    }

    for line in &panel.lines {
        let d = line_path(&frame, years, &line.values).to_svg();
        if d.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" stroke-linejoin=\"round\"/>\n",
            escape_xml(line.color)
        ));
    }

    for a in &panel.annotations {
        if !a.value.is_finite() {
            continue;
        }
        let p = frame.to_point(f64::from(a.year), a.value);
        let dy = match a.placement {
            Placement::Above => -10.0,
            Placement::Below => 15.0,
        };
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"11\" text-anchor=\"middle\">{}</text>\n",
            p.x,
            p.y + dy,
            escape_xml(&a.label)
        ));
    }

    write_legend(out, area, &panel.lines);

    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"16\" text-anchor=\"middle\">{}</text>\n",
        area.center().x,
        area.y0 - 14.0,
        escape_xml(panel.title)
    ));
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"13\" text-anchor=\"middle\">Years</text>\n",
        area.center().x,
        area.y1 + 42.0
    ));
    let (lx, ly) = (area.x0 - 62.0, area.center().y);
    out.push_str(&format!(
        "<text x=\"{lx:.2}\" y=\"{ly:.2}\" font-size=\"13\" text-anchor=\"middle\" transform=\"rotate(-90 {lx:.2} {ly:.2})\">{}</text>\n",
        escape_xml(panel.y_label)
    ));
    Ok(())
}

fn write_legend(out: &mut String, area: Rect, lines: &[Line<'_>]) {
    let (x0, y0) = (area.x0 + 12.0, area.y0 + 12.0);
    let row_h = 20.0;
    let box_w = 12.0
        + 30.0
        + 8.0
        + lines
            .iter()
            .map(|l| l.label.chars().count())
            .max()
            .unwrap_or(0) as f64
            * 7.0;
    out.push_str(&format!(
        "<rect x=\"{x0:.2}\" y=\"{y0:.2}\" width=\"{box_w:.2}\" height=\"{:.2}\" fill=\"white\" fill-opacity=\"0.8\" stroke=\"#cccccc\"/>\n",
        row_h * lines.len() as f64 + 8.0
    ));
    for (i, line) in lines.iter().enumerate() {
        let y = y0 + 14.0 + row_h * i as f64;
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
            x0 + 6.0,
            x0 + 36.0,
            escape_xml(line.color)
        ));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\">{}</text>\n",
            x0 + 44.0,
            y + 4.0,
            escape_xml(line.label)
        ));
    }
}

/// Polyline through the finite points; a non-finite value starts a new subpath.
fn line_path(frame: &PlotFrame, xs: &[f64], ys: &[f64]) -> BezPath {
    let mut path = BezPath::new();
    let mut pen_down = false;
    for (&x, &y) in xs.iter().zip(ys) {
        if !y.is_finite() {
            pen_down = false;
            continue;
        }
        let p = frame.to_point(x, y);
        if pen_down {
            path.line_to(p);
        } else {
            path.move_to(p);
            pen_down = true;
        }
    }
    path
}

fn minor_ticks(extent: Extent, major_step: f64) -> Vec<f64> {
    let minor_step = major_step / 5.0;
    ticks(extent, minor_step)
        .into_iter()
        .filter(|v| {
            let r = (v / major_step).round() * major_step;
            (v - r).abs() > minor_step * 1e-6
        })
        .collect()
}

fn vline(out: &mut String, frame: &PlotFrame, x: f64, style: &str) {
    let px = frame.map_x(x);
    out.push_str(&format!(
        "<line x1=\"{px:.2}\" y1=\"{:.2}\" x2=\"{px:.2}\" y2=\"{:.2}\" {style}/>\n",
        frame.area.y0, frame.area.y1
    ));
}

fn hline(out: &mut String, frame: &PlotFrame, y: f64, style: &str) {
    let py = frame.map_y(y);
    out.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{py:.2}\" x2=\"{:.2}\" y2=\"{py:.2}\" {style}/>\n",
        frame.area.x0, frame.area.x1
    ));
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/chart/svg.rs"]
mod tests;
