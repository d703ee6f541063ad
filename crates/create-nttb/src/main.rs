//! create-nttb - Project scaffolding for Next.js + TypeScript + Tailwind apps

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use scaffolder_core::{
    GitCloner, InstallRequest, Installer, IoMode, PackageInstaller, PackageManager,
    PlainProgress, Preflight, ProductConfig, Progress, TemplateSource,
};
use std::process::ExitCode;

/// create-nttb product configuration
#[derive(Clone)]
pub struct NttbConfig;

impl ProductConfig for NttbConfig {
    fn name(&self) -> &'static str {
        "create-nttb"
    }

    fn display_name(&self) -> &'static str {
        "create-nttb"
    }

    fn default_template_url(&self) -> &'static str {
        "https://github.com/SamNewhouse/create-nttb"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/SamNewhouse/create-nttb#readme"
    }

    fn keywords(&self) -> &'static [&'static str] {
        &[
            "create-nttb",
            "nextjs",
            "react",
            "typescript",
            "tailwindcss",
            "boilerplate",
        ]
    }

    fn scripts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("dev", "next dev"),
            ("build", "next build"),
            ("start", "next start"),
            ("format", "prettier --write ."),
            ("test", "jest"),
        ]
    }

    fn cleanup_targets(&self) -> &'static [&'static str] {
        &[".git", ".github", "bin", "renovate.json", "tsconfig.cli.json"]
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-nttb")]
#[command(about = "Create a Next.js + TypeScript + Tailwind project")]
#[command(version)]
pub struct Args {
    /// Name of the project directory to create
    pub project_name: Option<String>,

    /// Template repository URL or local path (defaults to the create-nttb repository)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Package manager used to install dependencies
    #[arg(short, long, value_enum, default_value_t = PackageManager::Npm)]
    pub package_manager: PackageManager,

    /// Clone and clean up without installing dependencies
    #[arg(long)]
    pub skip_install: bool,

    /// Skip runtime and tool checks (for development use)
    #[arg(long)]
    pub skip_checks: bool,

    /// Show output from git and the package manager
    #[arg(short, long)]
    pub verbose: bool,
}

fn print_usage<C: ProductConfig>(config: &C) {
    eprintln!();
    eprintln!("Please provide a name for your application.");
    eprintln!("For example: {} my-app", config.name().cyan());
    eprintln!();
    eprintln!("{}", Args::command().render_usage());
}

fn progress_for(args: &Args) -> Box<dyn Progress> {
    // Spinners would interleave with streamed child output
    if args.verbose {
        Box::new(PlainProgress)
    } else {
        Box::new(scaffolder_core::tui::SpinnerProgress::new())
    }
}

async fn run(args: Args, project_name: String) -> Result<()> {
    let config = NttbConfig;
    let cwd = std::env::current_dir()?;

    let locator = args
        .template
        .clone()
        .unwrap_or_else(|| config.default_template_url().to_string());
    let template = TemplateSource::parse(&locator, &cwd);
    let request = InstallRequest::new(&project_name, &cwd, template)?;

    let io = if args.verbose {
        IoMode::Inherit
    } else {
        IoMode::Captured
    };
    let preflight = if args.skip_checks {
        Preflight::none()
    } else {
        Preflight::for_install(args.package_manager, args.skip_install)
    };
    let dependencies =
        (!args.skip_install).then(|| PackageInstaller::new(args.package_manager, io));

    let installer = Installer::new(config.clone(), GitCloner::new(io), dependencies, preflight);

    let mut progress = progress_for(&args);
    progress.intro(config.display_name());
    let summary = installer.run(&request, &mut progress).await?;

    println!();
    println!("  {}", "Installation complete".green().bold());
    println!();
    println!("  Next steps");
    println!();
    let mut steps = config.next_steps(request.project_name(), args.package_manager);
    if !summary.installed {
        steps.insert(1, format!("{} install", args.package_manager));
    }
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
    println!("  {} {}", "Docs:".dimmed(), config.docs_url());
    println!();

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let project_name = match args.project_name.clone() {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            print_usage(&NttbConfig);
            return ExitCode::FAILURE;
        }
    };

    let result = run(args, project_name).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["create-nttb", "my-app"]).unwrap();
        assert_eq!(args.project_name.as_deref(), Some("my-app"));
        assert_eq!(args.package_manager, PackageManager::Npm);
        assert!(!args.skip_install);
        assert!(args.template.is_none());
    }

    #[test]
    fn test_args_options() {
        let args = Args::try_parse_from([
            "create-nttb",
            "--template",
            "../nttb",
            "-p",
            "pnpm",
            "--skip-install",
            "--skip-checks",
            "my-app",
        ])
        .unwrap();
        assert_eq!(args.template.as_deref(), Some("../nttb"));
        assert_eq!(args.package_manager, PackageManager::Pnpm);
        assert!(args.skip_install);
        assert!(args.skip_checks);
    }

    #[test]
    fn test_project_name_is_optional_for_parser() {
        let args = Args::try_parse_from(["create-nttb"]).unwrap();
        assert!(args.project_name.is_none());
    }

    #[test]
    fn test_nttb_manifest_update() {
        let update = NttbConfig.manifest_update("my-app");
        assert_eq!(update.keywords.len(), 7);
        assert_eq!(update.keywords.last().map(String::as_str), Some("my-app"));
        assert_eq!(update.scripts.len(), 5);
    }

    #[test]
    fn test_clap_definition() {
        Args::command().debug_assert();
    }
}
