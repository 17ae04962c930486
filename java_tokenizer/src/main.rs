use java_tokenizer::config::runtime::RuntimeConfig;
use java_tokenizer::utils::{SourceMap, Span};
use java_tokenizer::{batch, logging, pipeline};
use std::env;
use std::path::Path;
use std::time::Instant;

/// Options that only affect how results are printed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct OutputOptions {
    json: bool,
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.java|directory> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let mut runtime = RuntimeConfig::from_env()?;
    let (mut batch_config, output) = parse_batch_options(&args[2..]);
    if args[2..].iter().any(|arg| arg == "--dump-tokens") {
        runtime.lexical.dump_tokens_on_failure = true;
    }
    batch_config.runtime = runtime.clone();

    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;

    let input_path = Path::new(&args[1]);
    let start = Instant::now();

    let succeeded = if input_path.is_file() {
        process_single_file(input_path, &runtime, output)
    } else if input_path.is_dir() {
        process_directory_batch(input_path, &batch_config)
    } else {
        eprintln!("Error: Input must be a .java file or a directory");
        eprintln!("  Path: {}", input_path.display());
        false
    };

    logging::print_cargo_style_summary();
    if !output.quiet {
        println!("Finished in {:.2}s", start.elapsed().as_secs_f64());
    }

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

fn print_help(program_name: &str) {
    println!("Java Tokenizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Splits Java 21 source into positioned tokens");
    println!();
    println!("USAGE:");
    println!("    {} <file.java>                   # Tokenize one file", program_name);
    println!("    {} <directory> [options]         # Tokenize a source tree", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --parallel          Force parallel processing (default)");
    println!("    --threads N         Set maximum number of threads (1-32, default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on first failing file");
    println!("    --quiet             Suppress progress and token listings");
    println!("    --dump-tokens       Log the tokens collected before a lexical error");
    println!("    --json              Print a single file's tokens as JSON");
    println!();
    println!("ENVIRONMENT:");
    println!("    JTOK_CONFIG_FILE    TOML file with [file_processor], [lexical] and [logging] tables");
    println!("    JTOK_LOGGING_MIN_LEVEL, JTOK_REQUIRE_JAVA_EXTENSION, ... override single preferences");
    println!();
    println!("EXAMPLES:");
    println!("    {} src/Main.java --json", program_name);
    println!("    {} src/ --threads 4", program_name);
    println!("    {} src/ --sequential --fail-fast", program_name);
}

fn parse_batch_options(args: &[String]) -> (batch::BatchConfig, OutputOptions) {
    let mut config = batch::BatchConfig::default();
    let mut output = OutputOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--sequential" => {
                config.max_threads = 1;
            }
            "--parallel" => {
                // Keep default parallel setting
            }
            "--threads" => {
                if let Some(value) = args.get(i + 1) {
                    match value.parse::<usize>() {
                        Ok(threads) => config.max_threads = threads.clamp(1, 32),
                        Err(_) => eprintln!("Warning: Invalid thread count '{}', using default", value),
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --threads requires a number");
                }
            }
            "--no-recursive" => {
                config.recursive = false;
            }
            "--max-files" => {
                if let Some(value) = args.get(i + 1) {
                    match value.parse::<usize>() {
                        Ok(max_files) => config.max_files = Some(max_files),
                        Err(_) => eprintln!("Warning: Invalid max files '{}', ignoring", value),
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --max-files requires a number");
                }
            }
            "--fail-fast" => {
                config.fail_fast = true;
            }
            "--quiet" => {
                config.progress_reporting = false;
                output.quiet = true;
            }
            "--json" => {
                output.json = true;
            }
            "--dump-tokens" => {
                // Applied to the runtime preferences by the caller
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    (config, output)
}

fn process_single_file(file_path: &Path, runtime: &RuntimeConfig, output: OutputOptions) -> bool {
    match pipeline::process_file_with_config(file_path, runtime, 0) {
        Ok(result) => {
            if output.json {
                match pipeline::PipelineOutput::new(&result).to_json_pretty() {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("Failed to serialize tokens: {}", error);
                        return false;
                    }
                }
            } else if !output.quiet {
                for token in &result.tokens {
                    println!("{}", token);
                }
                println!();
                println!(
                    "{}: {} tokens in {} lines",
                    result.source_name,
                    result.token_count(),
                    result.metrics.last_line
                );
            }
            true
        }
        Err(error) => {
            eprintln!("FAILED: {}", error);
            print_detailed_error(file_path, &error);
            false
        }
    }
}

/// Show the failing line with a caret when the error has a position.
fn print_detailed_error(file_path: &Path, error: &pipeline::PipelineError) {
    let Some((line, column)) = error.location() else {
        return;
    };
    let Ok(source) = std::fs::read_to_string(file_path) else {
        return;
    };
    let map = SourceMap::new(source);
    let span = Span::single(map.position_of(line, column));
    eprint!(
        "{}",
        map.format_error(&span, &format!("[{}] {}", error.error_code(), error))
    );
}

fn process_directory_batch(dir_path: &Path, config: &batch::BatchConfig) -> bool {
    if config.progress_reporting {
        println!("Starting batch tokenization: {}", dir_path.display());
        println!(
            "Configuration: {} threads, recursive={}, fail_fast={}",
            config.max_threads, config.recursive, config.fail_fast
        );
        if let Some(max_files) = config.max_files {
            println!("File limit: {} files maximum", max_files);
        }
    }

    match batch::process_directory_with_config(dir_path, config) {
        Ok(results) => {
            print_batch_results(&results);
            results.failure_count() == 0
        }
        Err(error) => {
            eprintln!("Batch processing failed [{}]: {}", error.error_code(), error);
            false
        }
    }
}

fn print_batch_results(results: &batch::BatchResults) {
    println!("\n{}", results.summary());
    println!("  Files discovered: {}", results.files_discovered);

    if results.processing_duration.as_secs_f64() > 0.0 {
        let tokens_per_sec = results.total_tokens() as f64 / results.processing_duration.as_secs_f64();
        println!("  Processing rate: {:.0} tokens/sec", tokens_per_sec);
    }

    if results.failure_count() > 0 {
        println!("\nFailed Files:");
        for (file_path, error) in &results.failed_files {
            println!("  {}: {}", file_path.display(), get_error_summary(error));
        }
    }
}

fn get_error_summary(error: &pipeline::PipelineError) -> String {
    match error {
        pipeline::PipelineError::FileProcessing(err) => format!("file error [{}]", err.error_code()),
        pipeline::PipelineError::LexicalAnalysis(err) => match err.location() {
            Some((line, column)) => format!("lexical error [{}] at {}:{}", err.error_code(), line, column),
            None => format!("lexical error [{}]", err.error_code()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use java_tokenizer::lexical::LexicalError;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_batch_options() {
        let (config, output) = parse_batch_options(&args(&[
            "--threads",
            "4",
            "--fail-fast",
            "--no-recursive",
            "--json",
        ]));
        assert_eq!(config.max_threads, 4);
        assert!(config.fail_fast);
        assert!(!config.recursive);
        assert!(output.json);
        assert!(!output.quiet);
    }

    #[test]
    fn test_parse_batch_options_invalid() {
        let (config, _) = parse_batch_options(&args(&["--threads", "invalid", "--unknown-option"]));
        assert_ne!(config.max_threads, 0);
    }

    #[test]
    fn thread_count_is_clamped() {
        let (config, _) = parse_batch_options(&args(&["--threads", "500"]));
        assert_eq!(config.max_threads, 32);
        let (config, _) = parse_batch_options(&args(&["--threads", "0"]));
        assert_eq!(config.max_threads, 1);
    }

    #[test]
    fn quiet_disables_progress() {
        let (config, output) = parse_batch_options(&args(&["--quiet", "--max-files", "7"]));
        assert!(!config.progress_reporting);
        assert!(output.quiet);
        assert_eq!(config.max_files, Some(7));
    }

    #[test]
    fn test_get_error_summary() {
        let error = pipeline::PipelineError::from(LexicalError::InvalidComment { line: 3, column: 5 });
        assert_eq!(get_error_summary(&error), "lexical error [E022] at 3:5");
    }
}
