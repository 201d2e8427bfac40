// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Android Publisher Edits API.
//!
//! See also <https://developers.google.com/android-publisher/api-ref/rest>.

use {
    crate::{GooglePlayClient, Result},
    serde::{Deserialize, Serialize},
};

pub const ANDROID_PUBLISHER_URL: &str =
    "https://androidpublisher.googleapis.com/androidpublisher/v3/applications";

pub const ANDROID_PUBLISHER_UPLOAD_URL: &str =
    "https://androidpublisher.googleapis.com/upload/androidpublisher/v3/applications";

/// An open edit transaction, the staging area all changes are grouped in
/// until committed.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEdit {
    pub id: String,
    #[serde(default)]
    pub expiry_time_seconds: Option<String>,
}

/// Metadata the service reports for an uploaded app bundle.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub version_code: i64,
    #[serde(default)]
    pub sha1: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Status of a release within a track.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseStatus {
    Draft,
    Completed,
}

impl ReleaseStatus {
    /// Classify a `--releaseType` flag value.
    ///
    /// Only the literal string `release` produces a completed rollout; every
    /// other value stays a draft.
    pub fn from_release_type(release_type: &str) -> Self {
        if release_type == "release" {
            Self::Completed
        } else {
            Self::Draft
        }
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// A set of version codes released together with one status.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRelease {
    pub version_codes: Vec<i64>,
    pub status: ReleaseStatus,
}

/// A release track and the releases assigned to it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub track: String,
    pub releases: Vec<TrackRelease>,
}

impl GooglePlayClient {
    /// Open a new edit scoped to a package.
    pub fn create_edit(&self, package_name: &str) -> Result<AppEdit> {
        let token = self.get_token()?;
        let req = self
            .client
            .post(format!("{ANDROID_PUBLISHER_URL}/{package_name}/edits"))
            .bearer_auth(token)
            .header("Accept", "application/json");
        Ok(self.send_request(req)?.json()?)
    }

    /// Upload an app bundle into an open edit, yielding its version code.
    pub fn upload_bundle(
        &self,
        package_name: &str,
        edit_id: &str,
        bundle: Vec<u8>,
    ) -> Result<Bundle> {
        let token = self.get_token()?;
        let req = self
            .client
            .post(format!(
                "{ANDROID_PUBLISHER_UPLOAD_URL}/{package_name}/edits/{edit_id}/bundles"
            ))
            .bearer_auth(token)
            .header("Accept", "application/json")
            .header("Content-Type", "application/octet-stream")
            .body(bundle);
        Ok(self.send_request(req)?.json()?)
    }

    /// Replace the releases assigned to a track within an open edit.
    pub fn update_track(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        release: TrackRelease,
    ) -> Result<Track> {
        let token = self.get_token()?;
        let body = Track {
            track: track.to_string(),
            releases: vec![release],
        };
        let req = self
            .client
            .put(format!(
                "{ANDROID_PUBLISHER_URL}/{package_name}/edits/{edit_id}/tracks/{track}"
            ))
            .bearer_auth(token)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&body);
        Ok(self.send_request(req)?.json()?)
    }

    /// Commit an open edit, making its changes live on the service.
    pub fn commit_edit(&self, package_name: &str, edit_id: &str) -> Result<AppEdit> {
        let token = self.get_token()?;
        let req = self
            .client
            .post(format!(
                "{ANDROID_PUBLISHER_URL}/{package_name}/edits/{edit_id}:commit"
            ))
            .bearer_auth(token)
            .header("Accept", "application/json");
        Ok(self.send_request(req)?.json()?)
    }

    /// Abandon an open edit, discarding its staged changes.
    pub fn delete_edit(&self, package_name: &str, edit_id: &str) -> Result<()> {
        let token = self.get_token()?;
        let req = self
            .client
            .delete(format!(
                "{ANDROID_PUBLISHER_URL}/{package_name}/edits/{edit_id}"
            ))
            .bearer_auth(token);
        self.send_request(req)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn release_type_classification() {
        assert_eq!(
            ReleaseStatus::from_release_type("release"),
            ReleaseStatus::Completed
        );
        assert_eq!(
            ReleaseStatus::from_release_type("draft"),
            ReleaseStatus::Draft
        );
        assert_eq!(ReleaseStatus::from_release_type(""), ReleaseStatus::Draft);
        assert_eq!(
            ReleaseStatus::from_release_type("Release"),
            ReleaseStatus::Draft
        );
        assert_eq!(
            ReleaseStatus::from_release_type("releasee"),
            ReleaseStatus::Draft
        );
    }

    #[test]
    fn track_encodes_camel_case() {
        let track = Track {
            track: "internal".into(),
            releases: vec![TrackRelease {
                version_codes: vec![17],
                status: ReleaseStatus::Draft,
            }],
        };

        assert_eq!(
            serde_json::to_string(&track).unwrap(),
            r#"{"track":"internal","releases":[{"versionCodes":[17],"status":"draft"}]}"#
        );
    }

    #[test]
    fn app_edit_decode() {
        let edit: AppEdit =
            serde_json::from_str(r#"{"id":"42","expiryTimeSeconds":"1700000000"}"#).unwrap();
        assert_eq!(edit.id, "42");
        assert_eq!(edit.expiry_time_seconds.as_deref(), Some("1700000000"));

        let edit: AppEdit = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
        assert!(edit.expiry_time_seconds.is_none());
    }

    #[test]
    fn bundle_decode() {
        let bundle: Bundle =
            serde_json::from_str(r#"{"versionCode":17,"sha256":"abcd"}"#).unwrap();
        assert_eq!(bundle.version_code, 17);
        assert_eq!(bundle.sha256.as_deref(), Some("abcd"));
        assert!(bundle.sha1.is_none());
    }

    #[test]
    fn release_status_display() {
        assert_eq!(ReleaseStatus::Draft.to_string(), "draft");
        assert_eq!(ReleaseStatus::Completed.to_string(), "completed");
    }
}
