// Candidate LLM prompt templates.
// All prompts for the candidates module are defined here.

/// Resume extraction prompt. Replace `{file_type}` and `{resume_text}` before sending.
pub const RESUME_EXTRACTION_PROMPT: &str = r#"Extract the following information from this {file_type} resume:
1. Name
2. Skills (as a list)
3. Experience (in years)
4. Education
5. Experience Level (Entry, Mid, Senior)

Return the information in a structured JSON format with the following keys:
{"name": "", "skills": [], "experience": "", "education": "", "experience_level": ""}

Resume content:
{resume_text}"#;

/// Career advice prompt. Replace every `{...}` placeholder before sending.
pub const CAREER_INSIGHTS_PROMPT: &str = r#"Based on the following candidate information:
- Name: {name}
- Skills: {skills}
- Experience: {experience}
- Education: {education}
- Experience Level: {experience_level}

Please provide:
1. Strengths
2. Areas for improvement
3. Suggested career paths
4. Potential certifications or courses that would help advance their career
5. Skills they should develop next

Format your response in markdown with one heading per section and bullet points under each."#;
