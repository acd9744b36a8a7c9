//! Console rendering of the canvas and the strategy document.

use crate::builder::StrategyBuilder;
use crate::canvas::PlacedComponent;
use crate::properties::PropertyControls;
use crate::strategy::schema::FieldKind;
use crate::strategy::Strategy;

pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// Render the canvas, each component's form, and the properties.
    pub fn render_canvas(builder: &StrategyBuilder) {
        println!();
        println!("{}", "=".repeat(60));
        println!(" STRATEGY: {}", builder.name());
        println!("{}", "=".repeat(60));

        let components = builder.canvas().components();
        if builder.canvas().is_empty() {
            println!("  (canvas is empty - add a component)");
        }
        for (i, component) in components.iter().enumerate() {
            for line in Self::component_lines(i + 1, component) {
                println!("{}", line);
            }
        }

        println!("{}", "-".repeat(60));
        println!("{}", Self::properties_line(builder.properties()));
        println!("{}", "=".repeat(60));
    }

    /// Pretty JSON of exactly what would be submitted.
    pub fn render_document(strategy: &Strategy) {
        match serde_json::to_string_pretty(strategy) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to render strategy document: {}", e),
        }
    }

    fn component_lines(position: usize, component: &PlacedComponent) -> Vec<String> {
        let mut lines = vec![format!(
            "{:>2}. {} [{}]",
            position,
            component.display_name,
            component.component_type()
        )];
        for field in &component.fields {
            let shown = match field.spec.kind {
                FieldKind::Number { .. } => field.value.clone(),
                FieldKind::Choice { options } => options
                    .iter()
                    .find(|o| o.value == field.value)
                    .map(|o| format!("{} ({})", o.label, o.value))
                    .unwrap_or_else(|| field.value.clone()),
            };
            lines.push(format!("      {:<20} {}", field.spec.label, shown));
        }
        lines
    }

    fn properties_line(properties: &PropertyControls) -> String {
        format!(
            "Risk: {} | Session: {} | Asset: {}",
            properties.risk_tolerance, properties.trading_session, properties.asset_class
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::palette::PaletteItem;
    use crate::canvas::Canvas;

    #[test]
    fn test_component_lines_show_choice_labels() {
        let mut canvas = Canvas::new();
        canvas
            .drop_item(&PaletteItem::new("indicator", "Moving Average"))
            .unwrap();
        let lines = ConsoleRenderer::component_lines(1, &canvas.components()[0]);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " 1. Moving Average [indicator]");
        assert!(lines[1].contains("Period") && lines[1].ends_with("14"));
        assert!(lines[2].ends_with("Simple (sma)"));
    }

    #[test]
    fn test_properties_line() {
        assert_eq!(
            ConsoleRenderer::properties_line(&PropertyControls::default()),
            "Risk: 5 | Session: Asian | Asset: Forex"
        );
    }
}
