use std::path::PathBuf;

use apiurl::Config;
use clap::Parser;
use tracing_attributes::instrument;

/// Replaces hard-coded `http://localhost:4000` API URLs in front-end views
/// with `API_BASE_URL`, adding its import where missing.
///
/// Without arguments, rewrites `src/views/Categories.vue` and
/// `src/views/AddProduct.vue` relative to the current directory.
#[derive(Debug, Parser, Clone)]
#[clap(version, author)]
pub struct CLIOpts {
    /// File to rewrite, in order. Repeat for several files. Replaces the list
    /// from the configuration file.
    #[clap(
        long = "file",
        value_name = "PATH",
        env = "FIX_API_URLS_FILES",
        value_delimiter = ','
    )]
    pub files: Vec<PathBuf>,
    /// TOML configuration file.
    #[clap(long, value_name = "PATH", env = "FIX_API_URLS_CONFIG")]
    pub config: Option<PathBuf>,
    /// Only replace files once every one of them was rewritten and staged.
    #[clap(long, env = "FIX_API_URLS_ALL_OR_NOTHING")]
    pub all_or_nothing: bool,
    /// Directory relative files are resolved against. Defaults to the current
    /// directory.
    #[clap(long, value_name = "DIR", env = "FIX_API_URLS_ROOT")]
    pub root: Option<PathBuf>,
}

mod logging;
mod report;

/// Command line over configuration file over defaults.
#[instrument(level = "debug", ret, err)]
fn load_config(opts: CLIOpts) -> apiurl::Result<Config> {
    let mut config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if !opts.files.is_empty() {
        config.target_files = opts.files;
    }
    if opts.all_or_nothing {
        config.all_or_nothing = true;
    }
    if let Some(root) = opts.root {
        config.root = Some(root);
    }
    Ok(config)
}

fn main() -> Result<(), apiurl::Error> {
    let opts = CLIOpts::parse();
    logging::init();

    let config = load_config(opts)?;
    let summary = apiurl::run(&config, &mut report::StdoutReporter::stdout())?;
    tracing::info!(
        files = summary.files.len(),
        imports_inserted = summary.imports_inserted(),
        replacements = summary.total_replacements(),
        "run complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> CLIOpts {
        CLIOpts::try_parse_from(std::iter::once("fix-api-urls").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_arguments_keeps_the_defaults() {
        let opts = parse(&[]);
        assert!(opts.files.is_empty());
        assert!(!opts.all_or_nothing);
        assert_eq!(load_config(opts).unwrap(), Config::default());
    }

    #[test]
    fn files_on_the_command_line_win_over_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("fix-api-urls.toml");
        std::fs::write(
            &config_path,
            "target_files = [\"src/views/Products.vue\"]\nall_or_nothing = true\n",
        )
        .unwrap();

        let config = load_config(parse(&[
            "--config",
            config_path.to_str().unwrap(),
            "--file",
            "a.vue",
            "--file",
            "b.vue",
        ]))
        .unwrap();

        assert_eq!(
            config.target_files,
            vec![PathBuf::from("a.vue"), PathBuf::from("b.vue")]
        );
        assert!(config.all_or_nothing);
    }

    #[test]
    fn config_file_list_is_used_when_no_file_given() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("fix-api-urls.toml");
        std::fs::write(&config_path, "target_files = [\"src/views/Products.vue\"]\n").unwrap();

        let config = load_config(parse(&[
            "--config",
            config_path.to_str().unwrap(),
            "--root",
            "frontend",
        ]))
        .unwrap();

        assert_eq!(config.target_files, vec![PathBuf::from("src/views/Products.vue")]);
        assert_eq!(config.root, Some(PathBuf::from("frontend")));
        assert!(!config.all_or_nothing);
    }

    #[test]
    fn file_list_splits_on_commas() {
        let opts = parse(&["--file", "src/views/Categories.vue,src/views/Products.vue"]);
        assert_eq!(
            opts.files,
            vec![
                PathBuf::from("src/views/Categories.vue"),
                PathBuf::from("src/views/Products.vue"),
            ]
        );
    }

    #[test]
    fn all_or_nothing_flag_selects_the_commit_mode() {
        let config = load_config(parse(&["--all-or-nothing"])).unwrap();
        assert_eq!(config.commit_mode(), apiurl::CommitMode::AllOrNothing);
        assert_eq!(config.target_files, Config::default().target_files);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(parse(&["--config", "/nonexistent/fix-api-urls.toml"])).unwrap_err();
        assert!(matches!(err, apiurl::Error::Config { .. }));
    }
}
