// GROQ queries for the three collections the site reads.
// Projections list every field `cms::documents` knows about; anything else is ignored.

pub const PROJECTS_QUERY: &str = r#"*[_type == "project"] | order(publishedAt desc) {
  _id,
  title,
  description,
  publishedAt,
  image,
  url,
  repositoryUrl,
  tags,
  slug
}"#;

pub const EXPERIENCE_QUERY: &str = r#"*[_type == "experience"] | order(startDate desc) {
  _id,
  company,
  role,
  startDate,
  endDate,
  description,
  responsibilities,
  location,
  technologies
}"#;

pub const TECH_STACK_QUERY: &str = r#"*[_type == "techStack"] | order(order asc) {
  _id,
  name,
  category,
  icon,
  order
}"#;
