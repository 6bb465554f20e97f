#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::{Parser, Subcommand};
    use portfolio_site::catalog;
    use portfolio_site::contact::{
        self, ContactForm, FormSurface, ReqwestRelay, StatusMessage, SubmitOutcome,
    };
    use portfolio_site::{config, output, render};
    use std::path::PathBuf;
    use tracing_subscriber::EnvFilter;

    #[derive(Parser)]
    #[command(name = "portfolio-site")]
    #[command(about = "Tooling for the portfolio page's interactive layer")]
    #[command(long_about = "\
Tooling for the portfolio page's interactive layer

The browser side of this crate is compiled to WebAssembly and attached to the
static page. This binary works on the same data from the terminal:

  site/
  ├── config.toml     # Optional overrides (timings, form relay, section ids)
  └── catalog.toml    # Optional repository catalog (built-in entries otherwise)

Catalog entries look like:

  [repos.portfolio]
  title = \"Personal Portfolio\"
  description = \"...\"
  technologies = [\"HTML5\", \"CSS3\"]
  features = [\"Responsive layout\"]
  github_url = \"https://github.com/you/portfolio\"
  live_url = \"https://you.github.io/portfolio\"
  stats = { commits = \"150+\", files = \"25\", languages = \"3\", size = \"2.5 MB\" }

Run 'portfolio-site gen-config' to generate a documented config.toml.")]
    #[command(version)]
    struct Cli {
        /// Directory holding config.toml and catalog.toml
        #[arg(long, default_value = ".", global = true)]
        config_dir: PathBuf,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// List the repositories in the catalog
        Catalog,
        /// Print the detail panel HTML for one repository
        Render {
            /// Catalog key, e.g. `portfolio`
            key: String,
        },
        /// Validate config.toml and catalog.toml
        Check,
        /// Print a stock config.toml with all options documented
        GenConfig,
        /// Submit a message to the form relay, as the contact form would
        Send(SendArgs),
    }

    #[derive(clap::Args)]
    struct SendArgs {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Form relay URL (overrides `[form] endpoint`)
        #[arg(long)]
        endpoint: Option<String>,
    }

    /// The contact form as seen from a terminal: fixed values, messages on stdout.
    struct CliSurface {
        form: ContactForm,
        sending_label: String,
    }

    impl FormSurface for CliSurface {
        fn read(&self) -> ContactForm {
            self.form.clone()
        }

        fn set_sending(&self, sending: bool) {
            if sending {
                println!("{}", self.sending_label);
            }
        }

        fn show_message(&self, message: &StatusMessage) {
            println!("{}", output::format_status(message));
        }

        fn reset(&self) {}
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();

        let cli = Cli::parse();

        match cli.command {
            Command::Catalog => {
                let catalog = catalog::load_catalog(&cli.config_dir)?;
                output::print_catalog(&catalog);
            }
            Command::Render { key } => {
                let catalog = catalog::load_catalog(&cli.config_dir)?;
                let repo = catalog
                    .get(&key)
                    .ok_or_else(|| format!("no repository '{key}' in the catalog"))?;
                println!("{}", render::repository_panel(repo).into_string());
            }
            Command::Check => {
                println!("==> Checking {}", cli.config_dir.display());
                let site_config = config::load_config(&cli.config_dir)?;
                let catalog = catalog::load_catalog(&cli.config_dir)?;
                output::print_check(&site_config, &catalog);
                println!("==> Configuration is valid");
            }
            Command::GenConfig => {
                print!("{}", config::stock_config_toml());
            }
            Command::Send(args) => {
                let site_config = config::load_config(&cli.config_dir)?;
                let endpoint = args
                    .endpoint
                    .unwrap_or_else(|| site_config.form.endpoint.clone());
                let surface = CliSurface {
                    form: ContactForm::new(&args.name, &args.email, &args.subject, &args.message),
                    sending_label: site_config.form.sending_label.clone(),
                };
                // Validation runs before the endpoint matters, so only require one for a valid form
                if surface.form.validate().is_ok() && endpoint.is_empty() {
                    return Err("no form endpoint: pass --endpoint or set [form] endpoint".into());
                }

                let runtime = tokio::runtime::Runtime::new()?;
                let outcome = runtime.block_on(contact::submit(
                    &surface,
                    &ReqwestRelay::new(),
                    &endpoint,
                ));
                match outcome {
                    SubmitOutcome::Sent => {}
                    SubmitOutcome::Invalid(error) => return Err(error.into()),
                    SubmitOutcome::Failed => return Err("message was not delivered".into()),
                }
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
