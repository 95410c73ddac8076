mod cli;

use clap::Parser;
use cli::Args;
use manager_editor::{
    ApiConfig, Effect, Field, FormPhase, HttpRepository, ManagerForm, ManagerRecord, Notice,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let subscriber = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = args.apply(ApiConfig::from_env()?);
    let repository = Arc::new(HttpRepository::new(config));
    tracing::info!("User service: {}", repository.config().base_url());

    let (form, mut effects) = ManagerForm::spawn(args.id.clone(), repository);

    let loaded = form.wait_for(|x| x.phase != FormPhase::Loading).await?;
    if loaded.phase == FormPhase::LoadFailed {
        form.teardown().await;
        return Err(format!("Could not load manager {}", args.id).into());
    }
    print_record(&loaded.record);

    if args.change_password {
        form.change_password().await?;
    } else {
        for (field, value) in args.edits() {
            form.change(field, value).await?;
        }
        form.submit().await?;
    }

    let outcome = render_effects(&mut effects).await;
    form.teardown().await;
    outcome
}

/// Prints effects until the form navigates away or reports an error.
async fn render_effects(
    effects: &mut mpsc::Receiver<Effect>,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(effect) = effects.recv().await {
        match effect {
            Effect::Notify(notice @ Notice::Success(_)) => println!("{notice}"),
            Effect::Notify(notice @ Notice::Error(_)) => {
                println!("{notice}");
                return Err(notice.message().into());
            }
            Effect::Navigate(route) => {
                println!("-> {route}");
                return Ok(());
            }
        }
    }
    Err("Form closed before finishing".into())
}

fn print_record(record: &ManagerRecord) {
    for field in Field::ALL {
        println!("{:>15}: {}", field.label(), record.get(field));
    }
}
