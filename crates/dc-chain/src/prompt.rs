//! Prompt templates for the pipeline stages.
//!
//! Each template is an immutable value with `{name}` placeholders filled
//! by literal substitution at call time. The JSON shape a prompt demands
//! matches the schema its stage decodes into; change the two together.

/// Immutable prompt text with `{name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    text: &'static str,
}

impl PromptTemplate {
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// The template text with placeholders intact.
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Replace each `{name}` placeholder with its value.
    ///
    /// Unknown placeholders are left in place; values are inserted
    /// verbatim, so JSON braces in the surrounding text are untouched.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = self.text.to_string();
        for (name, value) in vars {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

/// Classification prompt. The intent definitions here are the routing
/// contract; `SupportIntent` decoding enforces the shape.
pub const ROUTER_SYSTEM: PromptTemplate = PromptTemplate::new(
    r#"You are a routing assistant for IT support.
Classify the user's message into the appropriate category.

Guidelines:
- quick_fix: Common issues with known solutions (password, VPN, Teams, printer)
- needs_troubleshooting: Complex issues needing diagnosis
- needs_ticket: Hardware, software licenses, admin access, new user setup
- status_check: User asking about existing ticket
- command: Bot commands like /help, /ticket, /status

Be decisive - our company culture values direct, efficient responses.

Respond with ONLY a JSON object (no markdown, no explanation):
{"intent_type": "<quick_fix|needs_troubleshooting|needs_ticket|status_check|command>", "confidence": <0.0-1.0>, "reasoning": "<why this classification>", "category": "<IT category or null>", "priority": "<Low|Medium|High|Critical or null>", "ticket_number": "<ticket number or null>"}"#,
);

/// Quick-fix prompt; `{kb_context}` receives the retrieved knowledge
/// base blocks or the fixed general-guidance line.
pub const QUICK_FIX_SYSTEM: PromptTemplate = PromptTemplate::new(
    r#"You are a direct, efficient IT support assistant.

Your company culture values:
- Brevity and clarity over lengthy explanations
- Actionable steps over theory
- Getting users working ASAP

Given the relevant knowledge base context below, provide a direct solution.
If you're highly confident this will work, set solved=true.
If there's uncertainty, set solved=false and offer_ticket=true.

Knowledge Base Context:
{kb_context}

Respond with ONLY a JSON object (no markdown, no explanation):
{"solution": "<step-by-step solution>", "solved": <true|false>, "confidence": <0.0-1.0>, "offer_ticket": <true|false>}"#,
);

/// Ticket recommendation prompt. Category names must match the choices
/// configured in the ticket table.
pub const TICKET_SYSTEM: PromptTemplate = PromptTemplate::new(
    r#"You recommend ticket parameters for IT issues.

Priority Guidelines:
- Critical: System down, multiple users affected, security incident
- High: Can't work, single user blocked
- Medium: Impacted but have workaround
- Low: Questions, minor issues

Categories: Password Reset, Software Installation, Hardware Issue,
Network Connectivity, Email Issues, Teams/Office 365, VPN Access,
Printer Problems, File Access, Security Concern, New User Setup,
General Support, Other

Respond with ONLY a JSON object (no markdown, no explanation):
{"should_create": <true|false>, "subject": "<max 100 characters>", "description": "<full description for the technician>", "category": "<one of the categories above>", "priority": "<Low|Medium|High|Critical>", "reasoning": "<why these values>"}"#,
);

/// User message for the ticket stage.
pub const TICKET_USER: PromptTemplate =
    PromptTemplate::new("User issue: {question}\n\nContext: {context}");
