use crate::locale::Locale;
use serde::Serialize;

/// Establishment facts handed to the assistant with every conversation.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeBase {
    pub organization: String,
    pub total_employees: u32,
    pub authorized_strength: u32,
    pub vacancies: u32,
    pub critical_gaps: Vec<String>,
    pub laws: Vec<String>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            organization: "وزارة الموارد البشرية - حكومة ذكية".to_string(),
            total_employees: 2150,
            authorized_strength: 2500,
            vacancies: 350,
            critical_gaps: vec![
                "قسم البرمجة".to_string(),
                "التدقيق المالي".to_string(),
                "الأمن السيبراني".to_string(),
            ],
            laws: vec![
                "قانون الخدمة المدنية رقم 24 لسنة 1960".to_string(),
                "قانون رواتب موظفي الدولة رقم 22 لسنة 2008".to_string(),
                "تعليمات الوصف الوظيفي لعام 2023".to_string(),
            ],
        }
    }
}

const ACTION_FORMATS: &str = r#"- {"type": "ADMIN_ORDER", "data": {"title": "...", "content": "..."}}
- {"type": "EMPLOYEE_CARD", "data": {...}}
- {"type": "ANALYSIS_CHART", "data": {...}}"#;

pub fn system_instruction(locale: Locale, knowledge: &KnowledgeBase) -> String {
    let knowledge = serde_json::to_string(knowledge).unwrap_or_default();
    match locale {
        Locale::Arabic => format!(
            "أنت \"Smart HR AI\"، المساعد الرقمي الرسمي لإدارة الملاك والموارد البشرية.\n\
             تحدث بلغة عربية فصحى إدارية رسمية ومحايدة. دورك التحليل والاقتراح والأتمتة ولا تتخذ قرارات نهائية.\n\
             مهامك: تحليل الملاك، دعم القرار بالنصوص القانونية، صياغة الأوامر الإدارية، البحث عن الموظفين.\n\
             قاعدة المعرفة الحالية:\n{knowledge}\n\
             عند صياغة أمر إداري أو عرض بيانات موظف أو تحليل، أرفق كتلة ```json بإحدى الصيغ:\n{ACTION_FORMATS}"
        ),
        Locale::English => format!(
            "You are \"Smart HR AI\", the official digital assistant for staffing and human resources.\n\
             Answer in a formal, neutral administrative register. You analyse, suggest and automate; you never take final decisions.\n\
             Tasks: staffing analysis, decision support citing the applicable law, drafting administrative orders, finding employees.\n\
             Current knowledge base:\n{knowledge}\n\
             When drafting an order, showing an employee or an analysis, attach one ```json block in one of these shapes:\n{ACTION_FORMATS}"
        ),
    }
}

pub fn job_description(locale: Locale, job_title: &str, department: &str, level: &str) -> String {
    match locale {
        Locale::Arabic => format!(
            "قم بصياغة وصف وظيفي مفصل لوظيفة \"{job_title}\" في قسم \"{department}\" بمستوى خبرة \"{level}\"."
        ),
        Locale::English => format!(
            "Write a detailed job description for \"{job_title}\" in the \"{department}\" department at the \"{level}\" experience level."
        ),
    }
}

pub fn interview_questions(locale: Locale, job_title: &str, industry: &str) -> String {
    match locale {
        Locale::Arabic => format!(
            "اقترح قائمة بأسئلة مقابلة احترافية لوظيفة \"{job_title}\" في قطاع \"{industry}\"."
        ),
        Locale::English => format!(
            "Suggest professional interview questions for a \"{job_title}\" role in the \"{industry}\" sector."
        ),
    }
}

pub fn analyze_resume(locale: Locale, resume_text: &str, job_title: &str) -> String {
    match locale {
        Locale::Arabic => format!(
            "حلل السيرة الذاتية التالية لوظيفة \"{job_title}\". اذكر نقاط القوة والضعف والملاءمة الوظيفية:\n\n{resume_text}"
        ),
        Locale::English => format!(
            "Analyse the following resume for the \"{job_title}\" role. List strengths, weaknesses and overall fit:\n\n{resume_text}"
        ),
    }
}

pub fn draft_policy(locale: Locale, topic: &str) -> String {
    match locale {
        Locale::Arabic => format!("قم بصياغة مسودة سياسة إدارية رسمية حول موضوع: \"{topic}\"."),
        Locale::English => format!("Draft a formal administrative policy on: \"{topic}\"."),
    }
}

pub fn create_form(locale: Locale, form_type: &str, employee_name: &str, reason: &str) -> String {
    match locale {
        Locale::Arabic => format!(
            "قم بإنشاء مسودة نموذج إداري من نوع \"{form_type}\" للموظف \"{employee_name}\" بالسبب التالي: \"{reason}\"."
        ),
        Locale::English => format!(
            "Create a draft \"{form_type}\" administrative form for employee \"{employee_name}\" for the following reason: \"{reason}\"."
        ),
    }
}

pub(crate) fn unavailable_notice(locale: Locale) -> &'static str {
    match locale {
        Locale::Arabic => "عذراً، تعذر الاتصال بخادم المساعد الذكي حالياً.",
        Locale::English => "Sorry, the assistant service cannot be reached right now.",
    }
}
