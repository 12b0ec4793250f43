use clap::Parser;
use log::info;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::time::Duration;
use xword_csp::backtracking_search::{find_fill, FillFailure, FillOptions};
use xword_csp::grid_config::{generate_grid_config_from_template_string, parse_structure};
use xword_csp::word_list::{WordList, WordListSourceConfig};

/// xword-csp: Fill a crossword structure from a vocabulary by constraint satisfaction
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the structure file, with _ representing fillable cells and anything else blocks
    structure_path: String,

    /// Path to the vocabulary file, one word per line
    words_path: String,

    /// Path to write the filled grid to [default: none]
    output_path: Option<String>,

    /// Give up after this many seconds [default: none]
    #[arg(long)]
    timeout: Option<u64>,

    /// Give up after visiting this many search states [default: none]
    #[arg(long)]
    max_states: Option<usize>,
}

struct Error(String);

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0) // Print error unquoted
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let args = Args::parse();

    let template = fs::read_to_string(&args.structure_path)
        .map_err(|_| Error(format!("Couldn't read file '{}'", args.structure_path)))?;

    let structure = parse_structure(&template).map_err(|err| Error(err.to_string()))?;
    let max_side = structure.len().max(structure.first().map_or(0, Vec::len));

    let word_list = WordList::new(
        vec![WordListSourceConfig::File {
            id: "0".into(),
            path: args.words_path.clone().into(),
        }],
        Some(max_side),
    );

    #[allow(clippy::comparison_chain)]
    if let Some(errors) = word_list.get_source_errors().get("0") {
        if errors.len() == 1 {
            return Err(Error(format!("{}", errors[0])));
        } else if errors.len() > 1 {
            let mut full_error: String = "".into();
            for error in errors {
                full_error.push_str(&format!("\n- {error}"));
            }
            return Err(Error(full_error));
        }
    }

    let grid_config = generate_grid_config_from_template_string(word_list, &template)
        .map_err(|err| Error(err.to_string()))?;

    info!(
        "Loaded {} variables and {} words",
        grid_config.variable_count(),
        grid_config.word_list.len()
    );

    let options = FillOptions {
        timeout: args.timeout.map(Duration::from_secs),
        max_states: args.max_states,
        abort: None,
    };

    let assignment = match find_fill(&grid_config, &options) {
        Ok(success) => success.assignment,
        Err(FillFailure::HardFailure) => {
            println!("No solution.");
            return Ok(());
        }
        Err(FillFailure::Timeout) => return Err(Error("Timed out".into())),
        Err(FillFailure::Abort) => return Err(Error("Aborted".into())),
        Err(FillFailure::ExceededStateLimit(states)) => {
            return Err(Error(format!("Gave up after {states} states")));
        }
    };

    let rendered = grid_config.render_grid(&assignment.choices());
    println!("{rendered}");

    if let Some(output_path) = &args.output_path {
        fs::write(output_path, rendered + "\n")
            .map_err(|_| Error(format!("Couldn't write file '{output_path}'")))?;
    }

    Ok(())
}
