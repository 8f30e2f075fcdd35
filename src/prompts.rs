//! Prompt templates for the vision verifier and the answer-producing nodes.

/// Asks the vision model for nothing but the binomial name.
pub const BINOMIAL_PROMPT: &str = "Analyze the provided image. Return only the binomial scientific \
name of the species shown. Do not include explanations, descriptions, or any additional text. \
Expected format: \"Genus species\". Example: \"Macaca fuscata\".";

const SYNTHESIZE_TEMPLATE: &str = "You are an assistant with taxonomy expertise. The system has \
already identified the species as {binomial}. Using only the context below, write a clear, brief \
answer for the user that includes the scientific name and the common name if known. Do not invent \
facts.\n\n{context}";

const QA_TEMPLATE: &str = "Answer the user's question about {binomial} using only the context \
below. If the information is not in the context, reply exactly: \"Not enough information was \
found.\" Do not invent anything.\n\nQuestion: {question}\n\n{context}";

/// Prompt for the final identification answer.
pub fn synthesize_prompt(binomial: &str, context: &str) -> String {
  SYNTHESIZE_TEMPLATE
    .replace("{binomial}", binomial)
    .replace("{context}", context)
}

/// Prompt for follow-up questions about an already-identified subject.
pub fn qa_prompt(binomial: &str, question: &str, context: &str) -> String {
  QA_TEMPLATE
    .replace("{binomial}", binomial)
    .replace("{question}", question)
    .replace("{context}", context)
}
