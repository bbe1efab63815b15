// src/cli.rs
use std::{env, error::Error, path::PathBuf, sync::Arc, time::Duration};

use crate::api::{HttpPartsApi, PartsApi};
use crate::config::state::AppState;
use crate::core::net;
use crate::record::PartRecord;
use crate::sync::{SyncController, SyncState};
use crate::vendors;

const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct Params {
    pub url: Option<String>,
    pub api_base: Option<String>,
    pub create: Option<String>,
    pub update: Vec<String>,
    pub list_ipns: bool,
    pub schemas: bool,
    pub json: bool,
    pub out: Option<PathBuf>,
    pub no_sync: bool,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut params = Params::default();
    parse_cli(&mut params)?;

    let mut state = AppState::default();
    if let Some(base) = &params.api_base {
        state.options.api_base = base.clone();
    }
    state.options.offline = params.no_sync;

    let api = HttpPartsApi::new(&state.options.api_base_normalized());

    if params.list_ipns {
        let mut ipns: Vec<String> = api.list_ipns()?.into_iter().collect();
        ipns.sort();
        for ipn in ipns {
            println!("{ipn}");
        }
        return Ok(());
    }

    if params.schemas {
        let schemas = api.category_schemas()?;
        if params.json {
            println!("{}", serde_json::to_string_pretty(&schemas)?);
        } else {
            for (category, fields) in &schemas {
                println!("{category}: {}", fields.join(", "));
            }
        }
        return Ok(());
    }

    let url = params.url.as_deref().ok_or("Missing --url")?;
    let fetch = |u: &str| net::fetch_page(u).map_err(|e| e.to_string());
    let (vendor, record) = vendors::capture(url, &fetch)?;
    eprintln!("{}: {} field(s) extracted", vendor.name(), record.len());

    if state.options.offline {
        return print_record(&params, &record);
    }

    let mut controller = SyncController::new(Arc::new(api));
    controller.begin_session(record.clone());
    settle(&mut controller)?;

    match controller.state() {
        SyncState::Matched(ipn) => eprintln!("Matched {ipn}"),
        SyncState::Unmatched => eprintln!("No stored record carries this MPN"),
        SyncState::Loading => {}
    }

    if let Some(ipn) = &params.create {
        controller.create_as(ipn)?;
        settle(&mut controller)?;
        eprintln!("Created {ipn}");
    }

    for field in &params.update {
        controller.update_field(field)?;
        settle(&mut controller)?;
        eprintln!("Updated {field}");
    }

    match controller.stored_record() {
        Some(stored) => print_record(&params, stored),
        None => print_record(&params, &record),
    }
}

/// Wait for in-flight calls, then surface whatever went wrong.
fn settle(controller: &mut SyncController) -> Result<(), Box<dyn Error>> {
    if !controller.wait_settled(SETTLE_TIMEOUT) {
        return Err("database did not answer in time".into());
    }
    if let Some(e) = controller.last_error() {
        return Err(s!(e).into());
    }
    Ok(())
}

fn print_record(params: &Params, record: &PartRecord) -> Result<(), Box<dyn Error>> {
    let mut text = String::new();
    if params.json {
        text = serde_json::to_string_pretty(&record.to_json())?;
        text.push('\n');
    } else {
        for (name, value) in record.iter() {
            text.push_str(name);
            text.push_str(": ");
            text.push_str(value);
            text.push('\n');
        }
    }
    match &params.out {
        Some(path) => {
            std::fs::write(path, text.as_bytes())?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-u" | "--url" => params.url = Some(args.next().ok_or("Missing value for --url")?),
            "--api" => params.api_base = Some(args.next().ok_or("Missing value for --api")?),
            "--create" => {
                let v = args.next().ok_or("Missing IPN for --create")?;
                params.create = Some(v.trim().to_string());
            }
            "--update" => {
                let v = args.next().ok_or("Missing field name for --update")?;
                params.update.push(v.trim().to_string());
            }
            "--list-ipns" => params.list_ipns = true,
            "--schemas" => params.schemas = true,
            "--json" => params.json = true,
            "-o" | "--out" => params.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--no-sync" => params.no_sync = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(())
}
