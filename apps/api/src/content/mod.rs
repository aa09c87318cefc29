// Content Transform: raw CMS documents in, display-ready records out.

pub mod records;
pub mod rich_text;
pub mod transform;
