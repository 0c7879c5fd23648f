mod figure;

use std::ops::RangeInclusive;

use eframe::egui::{self, Align2};
use egui_plot::{AxisHints, GridMark, Legend, Line, Plot, PlotPoint, Text, VLine, VPlacement};

pub use figure::{AxisConfig, FigureConfig, FigureError, SecondaryAxis, TickLabel};

/// A runnable egui application that draws a figure.
pub struct PlotApp {
    config: FigureConfig,
    series: Vec<Series>,
}

struct Series {
    name: String,
    points: Vec<PlotPoint>,
}

impl PlotApp {
    /// Creates an app for a validated figure.
    ///
    /// # Errors
    ///
    /// Returns [`FigureError`] if the figure config is invalid.
    pub fn new(config: FigureConfig) -> Result<Self, FigureError> {
        config.validate()?;
        Ok(Self {
            config,
            series: Vec::new(),
        })
    }

    #[must_use]
    pub fn add_series(mut self, name: &str, points: &[[f64; 2]]) -> Self {
        self.series.push(Series {
            name: name.to_string(),
            points: points.iter().copied().map(Into::into).collect(),
        });

        self
    }

    #[must_use]
    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    /// Opens a native window showing the figure and blocks until it closes.
    #[allow(clippy::missing_errors_doc)]
    pub fn run(self) -> Result<(), eframe::Error> {
        let title = self.config.title.clone();
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(title.clone())
                .with_inner_size(self.config.size),
            ..Default::default()
        };

        eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(self))))
    }

    fn plot(&self) -> Plot<'static> {
        let FigureConfig {
            x_axis,
            y_axis,
            secondary_x,
            ..
        } = &self.config;

        let mut plot = Plot::new("lookback-plot")
            .legend(Legend::default())
            .y_axis_label(y_axis.label.clone());

        if let Some([min, max]) = x_axis.limits {
            plot = plot.include_x(min).include_x(max);
        }
        if let Some([min, max]) = y_axis.limits {
            plot = plot.include_y(min).include_y(max);
        }

        let bottom = AxisHints::new_x().label(x_axis.label.clone());
        // Secondary tick text is drawn at the exact tick positions in
        // `update`, so the top axis only carries the label.
        let axes = match secondary_x {
            Some(secondary) => {
                let top = AxisHints::new_x()
                    .label(secondary.label.clone())
                    .placement(VPlacement::Top)
                    .formatter(|_mark: GridMark, _range: &RangeInclusive<f64>| String::new());
                vec![bottom, top]
            }
            None => vec![bottom],
        };

        plot.custom_x_axes(axes)
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.config.title.is_empty() {
                ui.heading(&self.config.title);
            }

            self.plot().show(ui, |plot_ui| {
                for series in &self.series {
                    let points = series.points.as_slice();
                    let name = &series.name;

                    plot_ui.line(Line::new(points).name(name));
                }

                if let Some(secondary) = &self.config.secondary_x {
                    let bounds = plot_ui.plot_bounds();
                    let x_range = bounds.min()[0]..=bounds.max()[0];

                    for (anchor, text) in tick_anchors(secondary, &x_range, bounds.max()[1]) {
                        plot_ui.vline(VLine::new(anchor.x).name(&secondary.label));
                        plot_ui.text(Text::new(anchor, text).anchor(Align2::CENTER_TOP));
                    }
                }
            });
        });
    }
}

/// Where each visible secondary tick's text goes: at its exact position
/// along the top edge of the plot.
fn tick_anchors<'a>(
    axis: &'a SecondaryAxis,
    x_range: &RangeInclusive<f64>,
    top: f64,
) -> Vec<(PlotPoint, &'a str)> {
    axis.ticks
        .iter()
        .filter(|tick| x_range.contains(&tick.position))
        .map(|tick| (PlotPoint::new(tick.position, top), tick.text.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_figures() {
        let config = FigureConfig {
            size: [-1.0, 300.0],
            ..FigureConfig::default()
        };
        assert!(PlotApp::new(config).is_err());
    }

    #[test]
    fn series_are_collected_in_order() {
        let app = PlotApp::new(FigureConfig::default())
            .expect("default figure is valid")
            .add_series("first", &[[0.0, 1.0], [1.0, 2.0]])
            .add_series("second", &[[0.0, 3.0]]);

        let names: Vec<&str> = app.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(app.series[0].points.len(), 2);
    }

    #[test]
    fn tick_text_sits_at_exact_positions() {
        let axis = SecondaryAxis::new(
            "Time since Big Bang (Gyr)",
            vec![
                TickLabel::new(0.034_265, "13"),
                TickLabel::new(1.211_454, "5"),
                TickLabel::new(5.606_047, "1"),
            ],
        );

        let anchors = tick_anchors(&axis, &(0.0..=5.0), 2000.0);
        let placed: Vec<(f64, f64, &str)> = anchors
            .iter()
            .map(|(point, text)| (point.x, point.y, *text))
            .collect();

        // The last tick lies past the visible range.
        assert_eq!(placed, [(0.034_265, 2000.0, "13"), (1.211_454, 2000.0, "5")]);
    }
}
