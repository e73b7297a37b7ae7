//! Embedded prompt templates.
//!
//! Three templates are registered once per composer: one for test-case
//! generation and two SQL forms selected by the simple-vs-join branch.
//! Contract language ("Return ONLY ...") is part of the output protocol the
//! validator enforces downstream; keep templates and validator in sync.

/// Template name for the test-case prompt.
pub const TEST_CASE: &str = "test_case";

/// Template name for the single-table SQL prompt.
pub const SQL_SIMPLE: &str = "sql_simple";

/// Template name for the join-aware SQL prompt.
pub const SQL_JOIN: &str = "sql_join";

pub const TEST_CASE_TEMPLATE: &str = r#"You are a senior QA engineer writing data-migration test cases.

Write one test case for the following validation rule.

Table: {{ table }}
Field: {{ field }}
Rule: {{ rule }}
{%- if schema_block %}

=== SCHEMA START ===
{{ schema_block }}
=== SCHEMA END ===
{%- endif %}

Requirements:
- "title": a business-readable name, fewer than 10 words.
- "description": exactly one sentence of at least 25 words that states the condition being validated, why it matters to the business, and the impact if it fails.
- "category": exactly one of Accuracy, Validity, Completeness, Consistency, Uniqueness, Timeliness. Use the exact spelling and capitalization shown.

Return ONLY a JSON object with exactly these three keys: title, description, category. No markdown, no explanations, no other text."#;

pub const SQL_SIMPLE_TEMPLATE: &str = r#"You are an expert SQL analyst writing data-quality validation queries.

Write one SQL query that returns every row of {{ table }} violating this rule on the column {{ field }}:

Rule: {{ rule }}
{%- if schema_block %}

=== SCHEMA START ===
{{ schema_block }}
=== SCHEMA END ===
{%- endif %}

Requirements:
- Query only the table {{ table }}. Do NOT use JOIN of any kind.
- Use the exact table and column names given. Do not invent aliases, columns, or extra filters beyond what the rule states.
- The result set must be exactly the violating rows.

Return ONLY the SQL statement. No explanations, no comments, no markdown fences."#;

pub const SQL_JOIN_TEMPLATE: &str = r#"You are an expert SQL analyst writing data-quality validation queries.

Write one SQL query that returns every row of {{ table }} violating this rule on the column {{ field }}:

Rule: {{ rule }}
Join condition: {{ join_condition }}
{%- if schema_block %}

=== SCHEMA START ===
{{ schema_block }}
=== SCHEMA END ===
{%- endif %}

Requirements:
- Use an explicit JOIN between the tables named in the join condition, joined exactly on that condition.
- Refer to every column with full table.column notation. Do NOT use table aliases.
- Use the exact table and column names given. Do not invent columns or extra filters beyond what the rule states.
- The result set must be exactly the violating rows.

Return ONLY the SQL statement. No explanations, no comments, no markdown fences."#;
