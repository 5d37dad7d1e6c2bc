//! Prompt templates for the deliberation flow
//!
//! Every template is a pure function of its inputs; the grounding template
//! in particular is the whole of the prompt-composition step between
//! retrieval and Stage 1.

use crate::retrieval::chunk::ContextChunk;

/// Templates for each stage of a deliberation
pub struct PromptTemplate;

const GROUNDED_SYSTEM: &str = r#"You are a Thai legal expert assistant for thailawonline.com. You provide accurate, well-cited answers about Thai law based on retrieved legal documents.

**Instructions:**
- Answer based primarily on the retrieved legal documents provided below.
- Cite specific law sections (e.g., "Civil and Commercial Code Section 420") and Supreme Court case numbers (e.g., "Supreme Court Decision No. 1234/2565").
- If the retrieved documents do not contain sufficient information to answer, clearly state this and provide general guidance.
- Respond in the same language the user uses (Thai or English).
- Be precise and professional. Avoid speculation beyond what the legal texts support.
- When multiple legal provisions apply, explain how they interact.

**Retrieved Legal Documents:**
"#;

const NO_CONTEXT_SYSTEM: &str = r#"You are a Thai legal expert assistant for thailawonline.com. You provide accurate answers about Thai law.

**Instructions:**
- Answer questions about Thai law to the best of your knowledge.
- Cite specific law sections and court case numbers when possible.
- Respond in the same language the user uses (Thai or English).
- Be precise and professional.
- Clearly indicate when you are providing general guidance rather than citing specific provisions.

Note: No specific legal documents were retrieved for this query. Answer based on your general knowledge of Thai law."#;

impl PromptTemplate {
    /// System-turn grounding block for Stage 1.
    ///
    /// Empty input produces the fallback instruction that discloses the
    /// absence of retrieved sources. Otherwise each chunk is numbered,
    /// attributed, and embedded into the citation-discipline template.
    pub fn grounding_system(chunks: &[ContextChunk]) -> String {
        if chunks.is_empty() {
            return NO_CONTEXT_SYSTEM.to_string();
        }

        let context = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                format!("[Document {}] (Source: {})\n{}", i + 1, chunk.source, chunk.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");

        format!("{GROUNDED_SYSTEM}{context}\n")
    }

    /// System prompt for Stage 2 judges
    pub fn ranking_system() -> &'static str {
        r#"You are an impartial evaluator of legal analyses.
You will see several anonymized answers to the same legal question.
Assess each answer for accuracy of the cited provisions, completeness, and clarity.
You must rank every answer, from best to worst, and justify your ordering."#
    }

    /// User prompt for Stage 2: present the anonymized answers and ask for a
    /// total order best to worst
    pub fn ranking_prompt(question: &str, anonymized: &[(String, String)]) -> String {
        let mut prompt = format!(
            r#"Original question: {}

Below are anonymized answers from several legal experts. Evaluate each one for:
1. Accuracy of cited law sections and case numbers
2. Completeness of the legal analysis
3. Clarity and practical usefulness

Answers to evaluate:
"#,
            question
        );

        for (label, content) in anonymized {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", label, content));
        }

        prompt.push_str(
            r#"
First give a brief justification for your ordering. Then finish with a single
line of exactly this form, listing every answer from best to worst:

RANKING: Response X, Response Y, ..."#,
        );

        prompt
    }

    /// System prompt for the Stage 3 chairman
    pub fn synthesis_system() -> &'static str {
        r#"You are the chairman of a council of legal experts.
Your task is to synthesize their answers into one final, authoritative response:
1. Reconcile the points on which the experts agree
2. Flag significant disagreements and state which position the law better supports
3. Preserve the citations (law sections, case numbers) from the strongest-ranked answers
4. Respond in the same language the user used (Thai or English)

Be precise and professional. Do not invent citations that no expert provided."#
    }

    /// User prompt for Stage 3: query, de-anonymized answers, ranking outcome
    pub fn synthesis_prompt(
        question: &str,
        responses: &[(String, String)],
        rankings: &[(String, String)],
    ) -> String {
        let mut prompt = format!(
            r#"Original question: {}

Expert answers:
"#,
            question
        );

        for (model, content) in responses {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", model, content));
        }

        if !rankings.is_empty() {
            prompt.push_str("\nCross-ranking outcome (each expert ranked all answers, best first):\n");
            for (judge, order) in rankings {
                prompt.push_str(&format!("- {} ranked: {}\n", judge, order));
            }
        }

        prompt.push_str(
            r#"
Based on the answers and rankings above, produce the single final answer for the user.
Keep citation fidelity: carry over the specific sections and case numbers from the
strongest answers, and acknowledge explicitly when the evidence is insufficient."#,
        );

        prompt
    }

    /// Prompt for generating a short conversation title from the first message
    pub fn title_prompt(message: &str) -> String {
        format!(
            r#"Generate a short title (at most 8 words) for a legal consultation that starts with the message below. Reply with the title only, no quotes.

Message: {}"#,
            message
        )
    }
}
