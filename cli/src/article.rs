//! The knowledge-base article this tool seeds, plus the queries used to
//! confirm it is retrievable afterwards.

use kbseed_vector_index::{VectorMetadata, VectorRecord};

/// Source tag stored with every KB vector and used as the query filter.
pub const SOURCE_TAG: &str = "kb_article";

/// Queries a support user would plausibly type when looking for the article.
pub const VERIFICATION_QUERIES: [&str; 4] = [
    "help me reset my password",
    "password reset selfcare",
    "how to reset server password",
    "forgot my password",
];

/// A KB article held in memory until the index takes ownership of it.
#[derive(Debug, Clone)]
pub struct KbArticle {
    /// Stable identifier; re-running the tool overwrites this record.
    pub id: &'static str,

    /// Human-readable title.
    pub title: &'static str,

    /// Full article text; this is what gets embedded.
    pub text: &'static str,
}

impl KbArticle {
    /// Turn the article and its embedding into an upsert-ready record.
    pub fn to_record(&self, embedding: Vec<f32>) -> VectorRecord {
        VectorRecord {
            id: self.id.to_string(),
            values: embedding,
            metadata: VectorMetadata {
                source: SOURCE_TAG.to_string(),
                title: self.title.to_string(),
                text: self.text.to_string(),
            },
        }
    }
}

/// The password-reset article.
pub fn password_reset() -> KbArticle {
    KbArticle {
        id: "kb_password_reset_selfcare",
        title: "How to reset server password using Self-Care Portal",
        text: r#"How to reset server password using Self-Care Portal

Issue: Password reset process using self care

First you need to be registered on self care portal.

To reset the password using Selfcare Portal, please follow the simple steps outlined below:

Step 1: Visit Selfcare Portal https://selfcare.acecloudhosting.com Click "Forgot your password".

Step 2: Enter your Server Username.

Step 3: Enter the CAPTCHA verification and Click Continue.

Step 4: In the window that opens, choose an authentication method from the list.

Step 5: Enter your new password and click Reset to finish.

Benefits:
- Reset your password anytime without contacting support
- Secure authentication methods
- Quick and easy process
- Available 24/7"#,
    }
}
