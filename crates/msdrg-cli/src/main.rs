use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use msdrg_core::{DischargeStatus, DrgResult, Encounter, Sex};
use msdrg_grouper::DrgGrouper;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "msdrg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group a single encounter given on the command line
    Group {
        /// Path to the Definitions Manual text files directory
        #[arg(long, value_name = "DIR")]
        data_dir: PathBuf,

        /// Principal diagnosis (ICD-10-CM code)
        #[arg(long)]
        pdx: String,

        /// Secondary diagnoses (comma-separated ICD-10-CM codes)
        #[arg(long)]
        sdx: Option<String>,

        /// Procedure codes (comma-separated ICD-10-PCS codes)
        #[arg(long = "proc")]
        procedures: Option<String>,

        /// Patient age in years
        #[arg(long, default_value_t = 0)]
        age: u32,

        /// Patient sex: M, F or U
        #[arg(long, default_value = "U")]
        sex: String,

        /// Discharge status: alive, expired or transferred
        #[arg(long, default_value = "alive")]
        discharge: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Show the full grouping note trace
        #[arg(short, long)]
        verbose: bool,
    },

    /// Group encounters from a CSV file
    Batch {
        /// Path to the Definitions Manual text files directory
        #[arg(long, value_name = "DIR")]
        data_dir: PathBuf,

        /// Input CSV file with one encounter per row
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output CSV file (prints a summary to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fill the notes column with the grouping note trace
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load a data directory and display reference-table counts
    Info {
        /// Path to the Definitions Manual text files directory
        #[arg(long, value_name = "DIR")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Group {
            data_dir,
            pdx,
            sdx,
            procedures,
            age,
            sex,
            discharge,
            format,
            verbose,
        } => group_command(
            &data_dir,
            &pdx,
            sdx.as_deref(),
            procedures.as_deref(),
            age,
            &sex,
            &discharge,
            &format,
            verbose,
        )?,
        Commands::Batch {
            data_dir,
            input,
            output,
            verbose,
        } => batch_command(&data_dir, &input, output.as_deref(), verbose)?,
        Commands::Info { data_dir } => info_command(&data_dir)?,
    }

    Ok(())
}

fn load_grouper(data_dir: &Path) -> Result<DrgGrouper> {
    DrgGrouper::load(data_dir).context(format!(
        "Failed to load Definitions Manual data from {}",
        data_dir.display()
    ))
}

#[allow(clippy::too_many_arguments)]
fn group_command(
    data_dir: &Path,
    pdx: &str,
    sdx: Option<&str>,
    procedures: Option<&str>,
    age: u32,
    sex: &str,
    discharge: &str,
    format: &str,
    verbose: bool,
) -> Result<()> {
    let sex = Sex::from_str(sex).ok_or_else(|| anyhow!("Invalid sex: {sex} (expected M, F or U)"))?;
    let discharge = DischargeStatus::from_str(discharge).ok_or_else(|| {
        anyhow!("Invalid discharge status: {discharge} (expected alive, expired or transferred)")
    })?;

    let grouper = load_grouper(data_dir)?;

    let encounter = Encounter::new(pdx)
        .secondary_dx(split_codes(sdx, ','))
        .procedures(split_codes(procedures, ','))
        .age(age)
        .sex(sex)
        .discharge_status(discharge);

    let result = grouper.group(&encounter);

    match format {
        "json" => {
            let json = json!({
                "drg": result.drg,
                "mdc": result.mdc,
                "description": result.description,
                "type": result.drg_type.as_str(),
                "severity": result.severity().as_str(),
                "mcc_dx": result.mcc_dx,
                "cc_dx": result.cc_dx,
                "surgical_procedure": result.surgical_procedure,
                "notes": result.notes,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => print_result_text(&result, verbose),
    }

    Ok(())
}

fn print_result_text(result: &DrgResult, verbose: bool) {
    println!("{}", "MS-DRG Grouping Result".bold().green());
    println!("{}", "=".repeat(50).bright_black());
    println!("  DRG:         {}", result.drg.cyan());
    println!("  Description: {}", result.description.cyan());
    println!(
        "  MDC:         {}",
        result.mdc.as_deref().unwrap_or("Pre-MDC").cyan()
    );
    println!("  Type:        {}", result.drg_type.as_str().cyan());

    if let Some(mcc) = &result.mcc_dx {
        println!("  MCC:         {}", mcc.yellow());
    } else if let Some(cc) = &result.cc_dx {
        println!("  CC:          {}", cc.yellow());
    } else {
        println!("  CC/MCC:      {}", "None".bright_black());
    }

    if let Some(procedure) = &result.surgical_procedure {
        println!("  Primary Procedure: {}", procedure.cyan());
    }

    if verbose && !result.notes.is_empty() {
        println!("\n{}", "Grouping Notes:".bold());
        for note in &result.notes {
            println!("  - {note}");
        }
    }
}

/// Result CSV columns, in output order
const RESULT_COLUMNS: [&str; 9] = [
    "encounter_id",
    "principal_dx",
    "drg",
    "mdc",
    "description",
    "type",
    "mcc_dx",
    "cc_dx",
    "notes",
];

fn batch_command(
    data_dir: &Path,
    input: &Path,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let grouper = load_grouper(data_dir)?;
    let content = fs::read_to_string(input)
        .context(format!("Failed to read input file: {}", input.display()))?;

    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or_else(|| anyhow!("Input CSV is empty"))?;
    let columns = parse_csv_line(header);
    let column = |name: &str| columns.iter().position(|c| c.trim() == name);

    let pdx_col = column("principal_dx")
        .ok_or_else(|| anyhow!("Input CSV is missing the principal_dx column"))?;
    let id_col = column("encounter_id");
    let sdx_col = column("secondary_dx");
    let proc_col = column("procedures");
    let age_col = column("age");
    let sex_col = column("sex");
    let discharge_col = column("discharge_status");

    let mut rows = Vec::new();
    for line in lines {
        let fields = parse_csv_line(line);
        let field = |col: Option<usize>| {
            col.and_then(|i| fields.get(i))
                .map(|s| s.trim())
                .unwrap_or("")
        };

        let encounter = Encounter::new(field(Some(pdx_col)))
            .secondary_dx(split_codes(Some(field(sdx_col)), ';'))
            .procedures(split_codes(Some(field(proc_col)), ';'))
            .age(field(age_col).parse().unwrap_or(0))
            .sex(Sex::from_str(field(sex_col)).unwrap_or(Sex::Unknown))
            .discharge_status(
                DischargeStatus::from_str(field(discharge_col)).unwrap_or(DischargeStatus::Alive),
            );

        let result = grouper.group(&encounter);
        rows.push(ResultRow {
            encounter_id: field(id_col).to_string(),
            principal_dx: encounter.principal_dx.clone(),
            result,
        });
    }

    if let Some(path) = output {
        write_results_csv(path, &rows, verbose)?;
        println!("Results written to {}", path.display());
    } else {
        for row in &rows {
            println!(
                "{}: DRG {} - {}",
                row.encounter_id,
                row.result.drg.cyan(),
                row.result.description
            );
        }
    }

    println!("\nProcessed {} encounters", rows.len());
    Ok(())
}

struct ResultRow {
    encounter_id: String,
    principal_dx: String,
    result: DrgResult,
}

fn write_results_csv(path: &Path, rows: &[ResultRow], verbose: bool) -> Result<()> {
    let mut out = RESULT_COLUMNS.join(",");

    for row in rows {
        let result = &row.result;
        let notes = if verbose {
            result.notes.join("; ")
        } else {
            String::new()
        };
        let fields = [
            row.encounter_id.as_str(),
            row.principal_dx.as_str(),
            result.drg.as_str(),
            result.mdc.as_deref().unwrap_or(""),
            result.description.as_str(),
            result.drg_type.as_str(),
            result.mcc_dx.as_deref().unwrap_or(""),
            result.cc_dx.as_deref().unwrap_or(""),
            notes.as_str(),
        ];
        out.push('\n');
        let encoded: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&encoded.join(","));
    }
    out.push('\n');

    fs::write(path, out).context(format!("Failed to write output file: {}", path.display()))
}

fn info_command(data_dir: &Path) -> Result<()> {
    let grouper = load_grouper(data_dir)?;
    let store = grouper.store();

    println!("{}", "Definitions Manual Information".bold().green());
    println!("{}", "=".repeat(50).bright_black());
    println!(
        "  DRG definitions:  {}",
        store.drg_count().to_string().yellow()
    );
    println!(
        "  Diagnosis codes:  {}",
        store.diagnosis_count().to_string().yellow()
    );
    println!(
        "  CC/MCC codes:     {}",
        store.cc_mcc_count().to_string().yellow()
    );
    println!(
        "  Procedure codes:  {}",
        store.procedure_count().to_string().yellow()
    );

    Ok(())
}

/// Split a delimited code list, dropping empty entries
fn split_codes(arg: Option<&str>, delimiter: char) -> Vec<String> {
    arg.map(|s| {
        s.split(delimiter)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Split one CSV record, honouring double-quoted fields
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Quote a CSV field when it contains a delimiter, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_codes_handles_both_delimiters() {
        assert_eq!(split_codes(Some("E119, I10"), ','), vec!["E119", "I10"]);
        assert_eq!(split_codes(Some("E119;I10;"), ';'), vec!["E119", "I10"]);
        assert!(split_codes(None, ',').is_empty());
    }

    #[test]
    fn csv_line_round_trips_quoted_fields() {
        let line = "enc-1,J189,\"Pneumonia, unspecified\",\"say \"\"hi\"\"\"";
        let fields = parse_csv_line(line);
        assert_eq!(
            fields,
            vec!["enc-1", "J189", "Pneumonia, unspecified", "say \"hi\""]
        );
    }

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("J189"), "J189");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
