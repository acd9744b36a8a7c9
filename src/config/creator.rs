use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use uuid::Uuid;

use crate::builder::StrategyBuilder;
use crate::canvas::ConfigField;
use crate::draft::{default_draft_filename, save_draft};
use crate::notify::Notifier;
use crate::properties::{ASSET_CLASSES, RISK_TOLERANCE_RANGE, TRADING_SESSIONS};
use crate::strategy::schema::FieldKind;
use crate::ui::console::ConsoleRenderer;

const MENU: &[&str] = &[
    "Add component",
    "Edit component",
    "Move component",
    "Remove component",
    "Set properties",
    "Rename strategy",
    "Show strategy",
    "Save draft",
    "Save to backend",
    "Deploy",
    "Quit",
];

/// Interactive loop driving the builder until the user quits.
pub async fn run_builder(builder: &mut StrategyBuilder, notifier: &mut dyn Notifier) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        ConsoleRenderer::render_canvas(builder);

        let selection = Select::with_theme(&theme)
            .with_prompt("Action")
            .default(0)
            .items(MENU)
            .interact()?;

        match MENU[selection] {
            "Add component" => add_component(&theme, builder)?,
            "Edit component" => edit_component(&theme, builder)?,
            "Move component" => move_component(&theme, builder)?,
            "Remove component" => remove_component(&theme, builder)?,
            "Set properties" => set_properties(&theme, builder)?,
            "Rename strategy" => {
                let name: String = Input::with_theme(&theme)
                    .with_prompt("Strategy name")
                    .default(builder.name().to_string())
                    .validate_with(|input: &String| -> Result<(), &str> {
                        if input.trim().is_empty() {
                            Err("Name must not be empty")
                        } else {
                            Ok(())
                        }
                    })
                    .interact_text()?;
                builder.set_name(name.trim());
            }
            "Show strategy" => ConsoleRenderer::render_document(&builder.build_strategy()),
            "Save draft" => {
                let strategy = builder.build_strategy();
                let filename: String = Input::with_theme(&theme)
                    .with_prompt("Draft filename")
                    .default(default_draft_filename(&strategy))
                    .interact_text()?;
                let path = if filename.ends_with(".toml") {
                    filename
                } else {
                    format!("{}.toml", filename)
                };
                let written = save_draft(&strategy, &path)?;
                println!("Draft saved to {}", written.display());
            }
            // Outcomes are already shown through the notifier
            "Save to backend" => {
                let _ = builder.save(notifier).await;
            }
            "Deploy" => {
                let _ = builder.deploy(notifier).await;
            }
            _ => return Ok(()),
        }
    }
}

fn add_component(theme: &ColorfulTheme, builder: &mut StrategyBuilder) -> Result<()> {
    let labels: Vec<String> = builder
        .palette()
        .items()
        .iter()
        .map(|item| format!("{} ({})", item.text, item.data_type))
        .collect();

    let index = Select::with_theme(theme)
        .with_prompt("Component")
        .default(0)
        .items(&labels)
        .interact()?;

    if let Err(e) = builder.drop_from_palette(index) {
        println!("Cannot add component: {}", e);
    }
    Ok(())
}

/// Ask which placed component to act on. `None` when the canvas is empty.
fn pick_component(theme: &ColorfulTheme, builder: &StrategyBuilder) -> Result<Option<Uuid>> {
    let components = builder.canvas().components();
    if components.is_empty() {
        println!("The canvas is empty.");
        return Ok(None);
    }

    let labels: Vec<String> = components
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {} ({})", i + 1, c.display_name, c.component_type()))
        .collect();

    let index = Select::with_theme(theme)
        .with_prompt("Component")
        .default(0)
        .items(&labels)
        .interact()?;
    Ok(Some(components[index].id))
}

fn edit_component(theme: &ColorfulTheme, builder: &mut StrategyBuilder) -> Result<()> {
    let Some(id) = pick_component(theme, builder)? else {
        return Ok(());
    };
    let Some(component) = builder.canvas().get(id) else {
        return Ok(());
    };
    let fields: Vec<ConfigField> = component.fields.clone();

    let labels: Vec<String> = fields
        .iter()
        .map(|f| format!("{} = {}", f.spec.label, f.value))
        .collect();
    let field_index = Select::with_theme(theme)
        .with_prompt("Field")
        .default(0)
        .items(&labels)
        .interact()?;
    let field = &fields[field_index];

    let value = match field.spec.kind {
        FieldKind::Number { .. } => {
            let spec = field.spec;
            Input::<String>::with_theme(theme)
                .with_prompt(spec.label)
                .default(field.value.clone())
                .validate_with(|input: &String| -> Result<(), String> {
                    spec.check(input).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()?
        }
        FieldKind::Choice { options } => {
            let option_labels: Vec<&str> = options.iter().map(|o| o.label).collect();
            let current = options
                .iter()
                .position(|o| o.value == field.value)
                .unwrap_or(0);
            let chosen = Select::with_theme(theme)
                .with_prompt(field.spec.label)
                .default(current)
                .items(&option_labels)
                .interact()?;
            options[chosen].value.to_string()
        }
    };

    builder.edit_field(id, field.spec.label, &value)?;
    Ok(())
}

fn move_component(theme: &ColorfulTheme, builder: &mut StrategyBuilder) -> Result<()> {
    let Some(id) = pick_component(theme, builder)? else {
        return Ok(());
    };
    let len = builder.canvas().len();

    let position: usize = Input::with_theme(theme)
        .with_prompt(format!("New position (1-{})", len))
        .validate_with(|input: &usize| -> Result<(), &str> {
            if *input >= 1 && *input <= len {
                Ok(())
            } else {
                Err("Position is outside the canvas")
            }
        })
        .interact_text()?;

    builder.move_component(id, position - 1)?;
    Ok(())
}

fn remove_component(theme: &ColorfulTheme, builder: &mut StrategyBuilder) -> Result<()> {
    let Some(id) = pick_component(theme, builder)? else {
        return Ok(());
    };

    let confirmed = Confirm::with_theme(theme)
        .with_prompt("Remove this component?")
        .default(false)
        .interact()?;
    if confirmed {
        builder.remove_component(id)?;
    }
    Ok(())
}

fn set_properties(theme: &ColorfulTheme, builder: &mut StrategyBuilder) -> Result<()> {
    let current = builder.properties().clone();

    let risk_levels: Vec<String> = RISK_TOLERANCE_RANGE.map(|r| r.to_string()).collect();
    let risk = Select::with_theme(theme)
        .with_prompt("Risk Tolerance")
        .default(
            risk_levels
                .iter()
                .position(|r| *r == current.risk_tolerance)
                .unwrap_or(0),
        )
        .items(&risk_levels)
        .interact()?;

    let session = Select::with_theme(theme)
        .with_prompt("Trading Session")
        .default(
            TRADING_SESSIONS
                .iter()
                .position(|s| *s == current.trading_session)
                .unwrap_or(0),
        )
        .items(TRADING_SESSIONS)
        .interact()?;

    let asset = Select::with_theme(theme)
        .with_prompt("Asset Class")
        .default(
            ASSET_CLASSES
                .iter()
                .position(|a| *a == current.asset_class)
                .unwrap_or(0),
        )
        .items(ASSET_CLASSES)
        .interact()?;

    let properties = builder.properties_mut();
    properties.risk_tolerance = risk_levels[risk].clone();
    properties.trading_session = TRADING_SESSIONS[session].to_string();
    properties.asset_class = ASSET_CLASSES[asset].to_string();
    Ok(())
}
