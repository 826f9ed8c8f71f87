//! Structural hashing for modified-since-save detection.

use crate::preset::{CustomTweak, PostProcess, Tweak};
use sha2::{Digest, Sha256};

// Field and record separators keep adjacent strings from colliding.
const FIELD: [u8; 1] = [0x1f];
const RECORD: [u8; 1] = [0x1e];

/// Hashes the complete mutable preset state into a hex digest.
///
/// Two states hash equal exactly when every enabled flag, parameter
/// value, custom tweak and the comment match; chain order of post
/// processes is part of the state.
pub fn state_hash(
    tweaks: &[Tweak],
    customs: &[CustomTweak],
    posts: &[PostProcess],
    comment: &str,
) -> String {
    let mut hasher = Sha256::new();

    for tweak in tweaks {
        hasher.update(tweak.key().as_bytes());
        hasher.update([tweak.is_enabled as u8]);
        for parameter in &tweak.parameters {
            hasher.update(FIELD);
            hasher.update(parameter.value.as_bytes());
        }
        hasher.update(RECORD);
    }

    for custom in customs {
        hasher.update(custom.key.as_bytes());
        hasher.update(FIELD);
        hasher.update(custom.name.as_bytes());
        hasher.update(FIELD);
        hasher.update(custom.shader_file.file_name().as_bytes());
        hasher.update(FIELD);
        hasher.update(custom.index.to_le_bytes());
        hasher.update([custom.is_enabled as u8]);
        hasher.update(FIELD);
        hasher.update(custom.old_code.as_bytes());
        hasher.update(FIELD);
        hasher.update(custom.new_code.as_bytes());
        hasher.update(RECORD);
    }

    for post in posts {
        hasher.update(post.key().as_bytes());
        hasher.update([post.is_enabled as u8]);
        hasher.update(post.index.to_le_bytes());
        for parameter in &post.parameters {
            hasher.update(FIELD);
            hasher.update(parameter.value.as_bytes());
        }
        hasher.update(RECORD);
    }

    hasher.update(comment.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::{post_process_catalog, tweak_catalog};

    #[test]
    fn hash_is_stable_for_identical_state() {
        let tweaks = tweak_catalog();
        let posts = post_process_catalog();
        let a = state_hash(&tweaks, &[], &posts, "comment");
        let b = state_hash(&tweak_catalog(), &[], &post_process_catalog(), "comment");
        assert_eq!(a, b);
    }

    #[test]
    fn enabling_a_tweak_changes_the_hash() {
        let mut tweaks = tweak_catalog();
        let posts = post_process_catalog();
        let before = state_hash(&tweaks, &[], &posts, "");
        tweaks[0].is_enabled = true;
        assert_ne!(before, state_hash(&tweaks, &[], &posts, ""));
    }

    #[test]
    fn editing_a_parameter_changes_the_hash() {
        let mut tweaks = tweak_catalog();
        let posts = post_process_catalog();
        let before = state_hash(&tweaks, &[], &posts, "");
        tweaks[0].parameters[0].value = "0.0000000009".to_string();
        assert_ne!(before, state_hash(&tweaks, &[], &posts, ""));
    }

    #[test]
    fn post_process_order_is_part_of_the_state() {
        let tweaks = tweak_catalog();
        let mut posts = post_process_catalog();
        let before = state_hash(&tweaks, &[], &posts, "");
        posts.swap(0, 1);
        assert_ne!(before, state_hash(&tweaks, &[], &posts, ""));
    }

    #[test]
    fn comment_edits_change_the_hash() {
        let tweaks = tweak_catalog();
        let posts = post_process_catalog();
        assert_ne!(
            state_hash(&tweaks, &[], &posts, "a"),
            state_hash(&tweaks, &[], &posts, "b")
        );
    }
}
