//! `stk new` - create a stackup sheet file

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::PathBuf;

use crate::cli::args::{GlobalOpts, NewArgs, OutputFormat};
use crate::cli::helpers::format_magnitude;
use crate::core::identity::SheetId;
use crate::core::Config;
use crate::stackup::template::SheetTemplate;

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let id = SheetId::new();
    let author = args.author.clone().unwrap_or_else(|| config.author());

    let mut tpl = if args.example {
        SheetTemplate::example(id, author)
    } else {
        SheetTemplate::new(id, author).with_units(config.units())
    };

    if let Some(ref title) = args.title {
        tpl = tpl.with_title(title);
    }
    if let Some(ref project) = args.project {
        tpl = tpl.with_project(project);
    }
    if let Some(ref units) = args.units {
        tpl = tpl.with_units(units);
    }
    if let Some(ref date) = args.date {
        tpl = tpl.with_date(date);
    }
    if let Some(target) = args.target {
        tpl = tpl.with_target(target);
    }

    if args.interactive {
        tpl = prompt_fields(tpl)?;
    }

    let file_name = format!("{}.stk.yaml", tpl.id);
    let file_path = match args.output {
        Some(ref p) if p.is_dir() => p.join(file_name),
        Some(ref p) => p.clone(),
        None => PathBuf::from(file_name),
    };
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .into_diagnostic()
                .wrap_err_with(|| format!("creating {}", parent.display()))?;
        }
    }

    fs::write(&file_path, tpl.render())
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {}", file_path.display()))?;

    match global.format {
        OutputFormat::Json => {
            let record = serde_json::json!({
                "id": tpl.id.to_string(),
                "path": file_path.display().to_string(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&record).into_diagnostic()?
            );
        }
        _ => {
            println!(
                "{} Created stackup sheet {}",
                style("✓").green(),
                style(tpl.id.to_string()).cyan()
            );
            println!("   {}", style(file_path.display()).dim());
            println!(
                "   Target: {}",
                style(format_magnitude(tpl.target_spec, &tpl.units)).yellow()
            );
        }
    }

    if args.edit {
        println!();
        println!("Opening in {}...", style(config.editor()).yellow());
        config.run_editor(&file_path).into_diagnostic()?;
    }

    Ok(())
}

fn prompt_fields(tpl: SheetTemplate) -> Result<SheetTemplate> {
    let theme = ColorfulTheme::default();

    println!("{} New stackup sheet", style("◆").cyan());

    let project: String = Input::with_theme(&theme)
        .with_prompt("Project")
        .default(tpl.project.clone())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    let title: String = Input::with_theme(&theme)
        .with_prompt("Title")
        .default(tpl.title.clone())
        .interact_text()
        .into_diagnostic()?;

    let date: String = Input::with_theme(&theme)
        .with_prompt("Date")
        .default(tpl.date.clone())
        .interact_text()
        .into_diagnostic()?;

    let units: String = Input::with_theme(&theme)
        .with_prompt("Units")
        .default(tpl.units.clone())
        .interact_text()
        .into_diagnostic()?;

    let target: f64 = Input::with_theme(&theme)
        .with_prompt("Target specification (±)")
        .default(tpl.target_spec)
        .interact_text()
        .into_diagnostic()?;

    Ok(tpl
        .with_project(project)
        .with_title(title)
        .with_date(date)
        .with_units(units)
        .with_target(target))
}
