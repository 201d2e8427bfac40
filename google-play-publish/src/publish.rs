// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Linear release publishing flow.

use {
    crate::{
        edits_api::{ReleaseStatus, TrackRelease},
        GooglePlayClient, Result,
    },
    std::path::PathBuf,
};

/// Everything one publish run needs, passed explicitly rather than captured
/// from surrounding scope.
#[derive(Clone, Debug)]
pub struct PublishRequest {
    pub package_name: String,
    pub artifact_file: PathBuf,
    pub track_name: String,
    pub status: ReleaseStatus,
}

/// The publishing service operations the flow drives, in call order.
///
/// [GooglePlayClient] is the production implementation; tests substitute a
/// recording fake.
pub trait EditService {
    fn create_edit(&self, package_name: &str) -> Result<String>;

    fn upload_bundle(&self, package_name: &str, edit_id: &str, bundle: Vec<u8>) -> Result<i64>;

    fn update_track(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        release: TrackRelease,
    ) -> Result<()>;

    fn commit_edit(&self, package_name: &str, edit_id: &str) -> Result<()>;

    fn delete_edit(&self, package_name: &str, edit_id: &str) -> Result<()>;
}

impl EditService for GooglePlayClient {
    fn create_edit(&self, package_name: &str) -> Result<String> {
        Ok(GooglePlayClient::create_edit(self, package_name)?.id)
    }

    fn upload_bundle(&self, package_name: &str, edit_id: &str, bundle: Vec<u8>) -> Result<i64> {
        Ok(GooglePlayClient::upload_bundle(self, package_name, edit_id, bundle)?.version_code)
    }

    fn update_track(
        &self,
        package_name: &str,
        edit_id: &str,
        track: &str,
        release: TrackRelease,
    ) -> Result<()> {
        GooglePlayClient::update_track(self, package_name, edit_id, track, release)?;
        Ok(())
    }

    fn commit_edit(&self, package_name: &str, edit_id: &str) -> Result<()> {
        GooglePlayClient::commit_edit(self, package_name, edit_id)?;
        Ok(())
    }

    fn delete_edit(&self, package_name: &str, edit_id: &str) -> Result<()> {
        GooglePlayClient::delete_edit(self, package_name, edit_id)
    }
}

/// Run the full publish sequence: open an edit, upload the bundle, assign it
/// to the requested track, and commit.
///
/// Every step is awaited before the next; the first failure aborts the run.
/// If a step fails after the edit was opened, the edit is abandoned on a
/// best effort basis so no orphaned edit lingers on the service. A failure
/// of that cleanup is logged and never masks the original error.
pub fn publish(service: &impl EditService, request: &PublishRequest) -> Result<()> {
    println!("Creating a new edit.");
    let edit_id = service.create_edit(&request.package_name)?;

    publish_edit(service, request, &edit_id).map_err(|error| {
        if let Err(cleanup) = service.delete_edit(&request.package_name, &edit_id) {
            log::warn!("failed to abandon edit {edit_id}: {cleanup:#}");
        }
        error
    })
}

fn publish_edit(service: &impl EditService, request: &PublishRequest, edit_id: &str) -> Result<()> {
    println!("Uploading bundle.");
    let artifact = std::fs::read(&request.artifact_file)?;
    let version_code = service.upload_bundle(&request.package_name, edit_id, artifact)?;

    println!("Preparing for release.");
    let release = TrackRelease {
        version_codes: vec![version_code],
        status: request.status,
    };
    service.update_track(&request.package_name, edit_id, &request.track_name, release)?;

    service.commit_edit(&request.package_name, edit_id)
}
