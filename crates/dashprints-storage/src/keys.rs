//! Key generation for stored artwork.

use dashprints_core::SanitizedName;
use uuid::Uuid;

/// Generate the storage key for one submission's artwork: `{submission_id}/{name}`.
pub fn generate_artwork_key(submission_id: Uuid, name: &SanitizedName) -> String {
    format!("{}/{}", submission_id, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_scoped_by_submission() {
        let id = Uuid::new_v4();
        let name = SanitizedName::new("logo.png").unwrap();
        assert_eq!(generate_artwork_key(id, &name), format!("{}/logo.png", id));
    }
}
