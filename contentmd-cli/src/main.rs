// Command-line interface for contentmd
//
// This binary converts between Markdown and the content model, and renders the model in
// debugging views.
//
// The core capabilities live in the contentmd-babel crate; this binary wires them to the
// command line and to the layered configuration from contentmd-config.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file
// extension, while being overwrittable by an explicit --from flag.
// Usage:
//  contentmd <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  contentmd convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  contentmd inspect <path> [<transform>]      - Render the model (defaults to "model-treeviz")
//  contentmd --list-formats                    - List formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Example:
//  contentmd notes.md --to json --extra-empty-line preserve --extra-pretty false

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use contentmd_babel::formats::{JsonFormat, MarkdownFormat};
use contentmd_babel::{Format, FormatRegistry, MarkdownOptions};
use contentmd_config::{ContentmdConfig, Loader};
use log::debug;
use std::collections::HashMap;
use std::fs;

/// Extras consumed while reading Markdown; everything else goes to the target format.
const IMPORT_PARAMS: &[&str] = &["empty-line", "direction", "split-lines-pattern"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("contentmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown and the content model")
        .long_about(
            "contentmd converts line-oriented Markdown into a structured content model and back.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (markdown, json, treeviz)\n  \
            - inspect: Render the content model of a Markdown file\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            contentmd inspect notes.md                       # View model tree\n  \
            contentmd notes.md --to json                     # Model as JSON (stdout)\n  \
            contentmd model.json --to markdown -o notes.md   # Back to Markdown",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a contentmd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Render the content model of a Markdown file")
                .long_about(
                    "Parse a Markdown file and print its content model.\n\n\
                    Transforms:\n  \
                    - model-treeviz:  tree visualization (default)\n  \
                    - model-json:     the model as JSON\n\n\
                    Extra Parameters:\n  \
                    --extra-show-formats   List text segments and non-default formats\n  \
                    --extra-empty-line     preserve, remove or merge blank lines\n\n\
                    Examples:\n  \
                    contentmd inspect notes.md\n  \
                    contentmd inspect notes.md model-json\n  \
                    contentmd inspect notes.md --extra-show-formats",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("View to render. Defaults to 'model-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Line-oriented Markdown (.md)\n  \
                    - json:     Content model as JSON (.json)\n  \
                    - treeviz:  Tree visualization (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    contentmd convert notes.md --to json              # Model as JSON (stdout)\n  \
                    contentmd convert model.json --to markdown -o a.md\n  \
                    contentmd notes.md --to treeviz                   # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    // RUST_LOG overrides the quiet default
    let _ = env_logger::builder()
        .filter_module("contentmd_babel", log::LevelFilter::Warn)
        .filter_module("contentmd", log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path means the default convert subcommand
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && cleaned_args[1] != "inspect"
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("path is required");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let (Some(input), Some(to)) = (
                sub_matches.get_one::<String>("input"),
                sub_matches.get_one::<String>("to"),
            ) else {
                fail("input and --to are required");
            };
            let registry = registry_from_config(&config);

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => {
                        debug!("detected source format '{detected}' for {input}");
                        detected
                    }
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        fail("Please specify --from explicitly");
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, extra_params);
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: HashMap<String, String>,
    config: &ContentmdConfig,
) {
    let source = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{path}': {e}")));

    let (import_params, render_params) = split_import_params(extra_params);
    let import = markdown_format_from_config(config)
        .import_options(&import_params)
        .unwrap_or_else(|e| fail(&format!("Error: {e}")));
    let params = build_inspect_params(config, transform, &render_params);

    let output = transforms::execute_transform(&source, transform, &import, &params)
        .unwrap_or_else(|e| fail(&format!("Execution error: {e}")));

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: HashMap<String, String>,
) {
    if let Err(e) = registry.get(from) {
        fail(&format!("Error: {e}"));
    }
    if let Err(e) = registry.get(to) {
        fail(&format!("Error: {e}"));
    }

    let source = fs::read_to_string(input)
        .unwrap_or_else(|e| fail(&format!("Error reading file '{input}': {e}")));

    let (import_params, format_params) = split_import_params(extra_params);

    let doc = registry
        .parse_with_options(&source, from, &import_params)
        .unwrap_or_else(|e| fail(&format!("Parse error: {e}")));
    debug!("parsed {} top-level blocks from {input}", doc.blocks.len());

    let result = registry
        .serialize_with_options(&doc, to, &format_params)
        .unwrap_or_else(|e| fail(&format!("Serialization error: {e}")));

    match output {
        Some(path) => {
            fs::write(path, result)
                .unwrap_or_else(|e| fail(&format!("Error writing file '{path}': {e}")));
        }
        None => print!("{result}"),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &ContentmdConfig) {
    println!("Conversion formats:");
    let registry = registry_from_config(config);
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            let mut directions = Vec::new();
            if format.supports_parsing() {
                directions.push("read");
            }
            if format.supports_serialization() {
                directions.push("write");
            }
            println!(
                "  {format_name:<10} {} ({})",
                format.description(),
                directions.join("/")
            );
        }
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ContentmdConfig {
    let loader = Loader::new().with_optional_file("contentmd.toml");
    let loader = if let Some(path) = explicit_path {
        debug!("layering configuration file {path}");
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(&format!("Failed to load configuration: {err}")))
}

fn markdown_format_from_config(config: &ContentmdConfig) -> MarkdownFormat {
    let options = MarkdownOptions::try_from(&config.markdown)
        .unwrap_or_else(|err| fail(&format!("Invalid markdown configuration: {err}")));
    MarkdownFormat::new(options)
}

/// The default registry with the configurable formats replaced by configured ones.
fn registry_from_config(config: &ContentmdConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(markdown_format_from_config(config));
    registry.register(JsonFormat::new(config.convert.json.pretty));
    registry
}

fn apply_config_overrides(
    config: &mut ContentmdConfig,
    extra_params: &mut HashMap<String, String>,
) {
    if let Some(raw) = take_override(extra_params, &["show-formats", "formats"]) {
        config.inspect.treeviz.show_formats = parse_bool_arg("show-formats", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["pretty"]) {
        config.convert.json.pretty = parse_bool_arg("pretty", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["block-separator"]) {
        config.markdown.export.block_separator = raw
            .replace("\\n", "\n")
            .replace("\\r", "\r")
            .replace("\\t", "\t");
    }
}

fn build_inspect_params(
    config: &ContentmdConfig,
    transform: &str,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    match transform {
        "model-treeviz" if config.inspect.treeviz.show_formats => {
            params.insert("show-formats".to_string(), "true".to_string());
        }
        "model-json" => {
            params.insert(
                "pretty".to_string(),
                config.convert.json.pretty.to_string(),
            );
        }
        _ => {}
    }

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn split_import_params(
    extra_params: HashMap<String, String>,
) -> (HashMap<String, String>, HashMap<String, String>) {
    extra_params
        .into_iter()
        .partition(|(key, _)| IMPORT_PARAMS.contains(&key.as_str()))
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => fail(&format!("Invalid boolean value '{other}' for --extra-{flag}")),
    }
}
