use std::ffi::OsString;

use clap::Parser;

/// Summarize the latest speculative plan of a Terraform Cloud/Enterprise
/// workspace as {"create":N,"update":N,"delete":N}.
#[derive(Parser, Debug)]
#[command(author, version)]
pub struct Cli {
    /// API token
    #[arg(long, env = "TFE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Organization name
    #[arg(long, env = "TFE_ORG")]
    pub org: Option<String>,

    /// Workspace name
    #[arg(long, env = "WORKSPACE_NAME")]
    pub workspace: Option<String>,

    /// API host, or full URL with scheme [default: app.terraform.io]
    #[arg(long, env = "TFE_URL")]
    pub url: Option<String>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, env = "TFE_TIMEOUT")]
    pub timeout: Option<String>,
}

/// Maps a leading bare `help` word to `--help`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.get(1).is_some_and(|arg| arg == "help") {
        args[1] = OsString::from("--help");
    }
    args
}
