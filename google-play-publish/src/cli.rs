// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::edits_api::ReleaseStatus;
use crate::publish::{self, PublishRequest};
use crate::{GooglePlayClient, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the service account JSON key file.
    #[clap(long = "serviceAccountKeyFile")]
    pub service_account_key_file: Option<PathBuf>,

    /// Package name of the application to publish.
    #[clap(long = "packageName")]
    pub package_name: Option<String>,

    /// Path to the app bundle to upload.
    #[clap(long = "artifactFile")]
    pub artifact_file: Option<PathBuf>,

    /// Release track to assign the uploaded bundle to.
    #[clap(long = "trackName")]
    pub track_name: Option<String>,

    /// `release` publishes a completed rollout; any other value stays a draft.
    #[clap(long = "releaseType")]
    pub release_type: Option<String>,
}

fn require<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("missing option: {name}"))
}

impl Args {
    /// Names of mandatory options absent from this invocation, in
    /// declaration order. Callers decide how to terminate.
    pub fn missing_options(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.service_account_key_file.is_none() {
            missing.push("serviceAccountKeyFile");
        }
        if self.package_name.is_none() {
            missing.push("packageName");
        }
        if self.artifact_file.is_none() {
            missing.push("artifactFile");
        }
        if self.track_name.is_none() {
            missing.push("trackName");
        }
        if self.release_type.is_none() {
            missing.push("releaseType");
        }
        missing
    }

    /// Authenticate and run the publish sequence to completion.
    pub fn run(self) -> Result<()> {
        let key_file = require(self.service_account_key_file, "serviceAccountKeyFile")?;
        let request = PublishRequest {
            package_name: require(self.package_name, "packageName")?,
            artifact_file: require(self.artifact_file, "artifactFile")?,
            track_name: require(self.track_name, "trackName")?,
            status: ReleaseStatus::from_release_type(&require(
                self.release_type,
                "releaseType",
            )?),
        };

        println!("Authenticating.");
        let client = GooglePlayClient::from_json_path(&key_file)?;

        publish::publish(&client, &request)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["google-play-publish"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    const FULL_ARGV: &[&str] = &[
        "--serviceAccountKeyFile",
        "key.json",
        "--packageName",
        "com.example.app",
        "--artifactFile",
        "app.aab",
        "--trackName",
        "internal",
        "--releaseType",
        "draft",
    ];

    #[test]
    fn full_invocation_has_no_missing_options() {
        let args = parse(FULL_ARGV);
        assert!(args.missing_options().is_empty());
        assert_eq!(args.package_name.as_deref(), Some("com.example.app"));
        assert_eq!(args.track_name.as_deref(), Some("internal"));
    }

    #[test]
    fn each_absent_flag_is_reported_by_name() {
        for (flag, name) in [
            ("--serviceAccountKeyFile", "serviceAccountKeyFile"),
            ("--packageName", "packageName"),
            ("--artifactFile", "artifactFile"),
            ("--trackName", "trackName"),
            ("--releaseType", "releaseType"),
        ] {
            let argv = FULL_ARGV
                .chunks(2)
                .filter(|pair| pair[0] != flag)
                .flatten()
                .copied()
                .collect::<Vec<_>>();

            let args = parse(&argv);
            assert_eq!(args.missing_options(), vec![name]);
        }
    }

    #[test]
    fn empty_invocation_reports_all_options_in_order() {
        let args = parse(&[]);
        assert_eq!(
            args.missing_options(),
            vec![
                "serviceAccountKeyFile",
                "packageName",
                "artifactFile",
                "trackName",
                "releaseType",
            ]
        );
    }
}
