#![allow(non_snake_case)]
use RustedSymbolic::Examples::symbolic_examples::sym_examples;
use RustedSymbolic::Utils::config::DemoConfig;
use RustedSymbolic::Utils::logger::init_logger;

/// usage: RustedSymbolic [config.toml]
fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match DemoConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => DemoConfig::default(),
    };
    if let Err(e) = init_logger(config.loglevel_str(), config.log_to_file) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let example = config.example;
    match example {
        0..=4 => sym_examples(example, &config),
        _ => {
            // run everything
            for example in 0..=4 {
                println!("________________ example {} ________________", example);
                sym_examples(example, &config);
            }
        }
    }
}
