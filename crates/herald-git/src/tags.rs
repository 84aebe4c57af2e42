//! Version tags

use tracing::{debug, instrument, trace};

use crate::repository::{GitRepo, Result};
use crate::types::{tag_version, TagInfo};

impl GitRepo {
    /// All tags that point at a commit, lightweight or annotated
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;

        let tags: Vec<TagInfo> = names
            .iter()
            .flatten()
            .filter_map(|name| {
                let target = self
                    .repo
                    .revparse_single(&format!("refs/tags/{}", name))
                    .and_then(|object| object.peel_to_commit());
                match target {
                    Ok(commit) => Some(TagInfo::new(name, commit.id().to_string())),
                    Err(err) => {
                        trace!(tag = name, error = %err, "tag does not point at a commit");
                        None
                    }
                }
            })
            .collect();

        debug!(count = tags.len(), "tags listed");
        Ok(tags)
    }

    /// The tag with the highest semantic version, ignoring non-version tags
    #[instrument(skip(self))]
    pub fn find_latest_tag(&self) -> Result<Option<TagInfo>> {
        let latest = self
            .tags()?
            .into_iter()
            .filter_map(|tag| tag_version(&tag.name).map(|version| (version, tag)))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, tag)| tag);

        debug!(latest = ?latest.as_ref().map(|t| t.name.as_str()), "latest version tag");
        Ok(latest)
    }
}
