// All LLM prompt constants for section rewriting and content generation.

/// Section rewrite prompt. Replace `{section}`, `{jd_context}` and `{original_text}`.
pub const REWRITE_PROMPT_TEMPLATE: &str = "You are an expert resume writer who specializes in ATS optimization.

Rewrite the following {section} section to be more impactful and ATS-friendly.
{jd_context}
ORIGINAL TEXT:
{original_text}

REQUIREMENTS:
1. Use strong action verbs (Led, Developed, Implemented, Achieved, etc.)
2. Include quantifiable results where possible
3. Incorporate relevant keywords naturally
4. Keep it concise but impactful
5. Maintain professional tone

Provide your response in this format:
REWRITTEN:
[Your improved text here]

IMPROVEMENTS:
- [List key improvements made]

KEYWORDS_ADDED:
[comma-separated list of keywords you added]";

/// Optional job-description block for the rewrite prompt. Replace `{job_description}`.
pub const REWRITE_JD_CONTEXT: &str = "\nTarget Job Description:\n{job_description}\n";

/// Bullet point prompt. Replace `{role}`, `{company}`, `{description}` and `{keywords_hint}`.
pub const BULLETS_PROMPT_TEMPLATE: &str = "Generate 4-5 impactful resume bullet points for this role:

Role: {role}
Company: {company}
Description: {description}
{keywords_hint}

Requirements:
- Start each with a strong action verb
- Include metrics/numbers where possible
- Be concise (one line each)
- Make ATS-friendly

Format: Return ONLY the bullet points, one per line, starting with \"•\" ";

/// Keyword hint for the bullet prompt. Replace `{keywords}`.
pub const BULLETS_KEYWORDS_HINT: &str = "\nTry to incorporate these keywords: {keywords}";

/// Professional summary prompt. Replace `{resume_text}`, `{target_role}` and `{years_experience}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Create a compelling professional summary for this resume:

{resume_text}

Target Role: {target_role}
Years of Experience: {years_experience}

Requirements:
- 2-3 sentences maximum
- Highlight key skills and achievements
- Make it ATS-friendly with relevant keywords
- Professional but engaging tone

Return ONLY the summary text, nothing else.";
