//! crates/schemes_connect_core/src/catalog.rs
//!
//! The built-in scheme catalog, used when no recommendations have been
//! fetched and as the pool for side-by-side comparison.

use crate::domain::{Confidence, Scheme};

struct CatalogEntry {
    id: u32,
    title: &'static str,
    category: &'static str,
    description: &'static str,
    eligibility: &'static str,
    documents: &'static [&'static str],
    apply_link: &'static str,
    source: &'static str,
    why_recommended: &'static str,
    confidence: u8,
}

impl CatalogEntry {
    fn to_scheme(&self) -> Scheme {
        Scheme {
            id: self.id,
            title: self.title.to_string(),
            category: self.category.to_string(),
            description: self.description.to_string(),
            eligibility: self.eligibility.to_string(),
            documents: self.documents.iter().map(|d| d.to_string()).collect(),
            apply_link: self.apply_link.to_string(),
            source: self.source.to_string(),
            why_recommended: self.why_recommended.to_string(),
            confidence: Confidence::from(self.confidence),
        }
    }
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: 101,
        title: "Ayushman Bharat - PMJAY",
        category: "Healthcare",
        description: "Health insurance cover up to ₹5 lakh per family per year.",
        eligibility: "Families listed under SECC 2011",
        documents: &["Aadhaar Card", "Ration Card"],
        apply_link: "https://pmjay.gov.in",
        source: "Ministry of Health",
        why_recommended: "Cashless treatment nationwide",
        confidence: 90,
    },
    CatalogEntry {
        id: 102,
        title: "National Health Mission",
        category: "Healthcare",
        description: "Strengthening public healthcare infrastructure.",
        eligibility: "All citizens",
        documents: &["Aadhaar Card"],
        apply_link: "https://nhm.gov.in",
        source: "MoHFW",
        why_recommended: "Improves rural & urban healthcare",
        confidence: 82,
    },
    CatalogEntry {
        id: 103,
        title: "Janani Suraksha Yojana",
        category: "Healthcare",
        description: "Promotes institutional deliveries for women.",
        eligibility: "Pregnant women below poverty line",
        documents: &["Aadhaar Card", "BPL Card"],
        apply_link: "https://nhm.gov.in",
        source: "MoHFW",
        why_recommended: "Safe childbirth incentives",
        confidence: 84,
    },
    CatalogEntry {
        id: 104,
        title: "Rashtriya Bal Swasthya Karyakram",
        category: "Healthcare",
        description: "Child health screening and early intervention.",
        eligibility: "Children up to 18 years",
        documents: &["Birth Certificate"],
        apply_link: "https://nhm.gov.in",
        source: "MoHFW",
        why_recommended: "Early disease detection",
        confidence: 80,
    },
    CatalogEntry {
        id: 105,
        title: "PM National Dialysis Programme",
        category: "Healthcare",
        description: "Free dialysis services at district hospitals.",
        eligibility: "Patients with kidney failure",
        documents: &["Doctor Prescription", "Aadhaar"],
        apply_link: "https://nhm.gov.in",
        source: "MoHFW",
        why_recommended: "Reduces dialysis cost burden",
        confidence: 78,
    },
    CatalogEntry {
        id: 201,
        title: "National Scholarship Portal",
        category: "Education",
        description: "Central portal for government scholarships.",
        eligibility: "SC/ST/OBC/Minority/EWS students",
        documents: &["Aadhaar", "Income Certificate", "Marksheet"],
        apply_link: "https://scholarships.gov.in",
        source: "Ministry of Education",
        why_recommended: "Multiple scholarships in one place",
        confidence: 88,
    },
    CatalogEntry {
        id: 202,
        title: "Post Matric Scholarship",
        category: "Education",
        description: "Financial support for post-matric studies.",
        eligibility: "SC/ST/OBC students",
        documents: &["Caste Certificate", "Income Proof"],
        apply_link: "https://scholarships.gov.in",
        source: "MoE",
        why_recommended: "Supports higher education",
        confidence: 85,
    },
    CatalogEntry {
        id: 203,
        title: "Mid Day Meal Scheme",
        category: "Education",
        description: "Free meals for school children.",
        eligibility: "Government school students",
        documents: &["School ID"],
        apply_link: "https://education.gov.in",
        source: "MoE",
        why_recommended: "Improves attendance & nutrition",
        confidence: 80,
    },
    CatalogEntry {
        id: 204,
        title: "Samagra Shiksha Abhiyan",
        category: "Education",
        description: "Integrated school education programme.",
        eligibility: "School students",
        documents: &["School Records"],
        apply_link: "https://samagra.education.gov.in",
        source: "MoE",
        why_recommended: "Holistic education support",
        confidence: 82,
    },
    CatalogEntry {
        id: 205,
        title: "PM eVidya",
        category: "Education",
        description: "Digital education via TV, radio, and online.",
        eligibility: "All students",
        documents: &["None"],
        apply_link: "https://pmvidya.education.gov.in",
        source: "MoE",
        why_recommended: "Remote learning access",
        confidence: 79,
    },
    CatalogEntry {
        id: 301,
        title: "PM Kisan Samman Nidhi",
        category: "Agriculture",
        description: "₹6000 annual income support to farmers.",
        eligibility: "Small & marginal farmers",
        documents: &["Land Records", "Aadhaar"],
        apply_link: "https://pmkisan.gov.in",
        source: "MoA",
        why_recommended: "Direct income support",
        confidence: 85,
    },
    CatalogEntry {
        id: 302,
        title: "PM Fasal Bima Yojana",
        category: "Agriculture",
        description: "Crop insurance against losses.",
        eligibility: "Farmers growing notified crops",
        documents: &["Land Records", "Bank Details"],
        apply_link: "https://pmfby.gov.in",
        source: "MoA",
        why_recommended: "Protects against crop failure",
        confidence: 83,
    },
    CatalogEntry {
        id: 303,
        title: "Soil Health Card Scheme",
        category: "Agriculture",
        description: "Soil nutrient assessment for farmers.",
        eligibility: "All farmers",
        documents: &["Land Details"],
        apply_link: "https://soilhealth.dac.gov.in",
        source: "MoA",
        why_recommended: "Improves crop yield",
        confidence: 78,
    },
    CatalogEntry {
        id: 304,
        title: "Kisan Credit Card",
        category: "Agriculture",
        description: "Affordable credit to farmers.",
        eligibility: "Farmers with landholding",
        documents: &["Aadhaar", "Land Records"],
        apply_link: "https://pmkisan.gov.in",
        source: "MoA",
        why_recommended: "Easy farm loans",
        confidence: 82,
    },
    CatalogEntry {
        id: 305,
        title: "National Agriculture Market (eNAM)",
        category: "Agriculture",
        description: "Online trading platform for crops.",
        eligibility: "Registered farmers",
        documents: &["Farmer Registration"],
        apply_link: "https://enam.gov.in",
        source: "MoA",
        why_recommended: "Better price discovery",
        confidence: 77,
    },
    CatalogEntry {
        id: 401,
        title: "Pradhan Mantri Jan Dhan Yojana",
        category: "Financial Inclusion",
        description: "Zero-balance bank accounts.",
        eligibility: "All Indian citizens",
        documents: &["Aadhaar", "Photo"],
        apply_link: "https://pmjdy.gov.in",
        source: "MoF",
        why_recommended: "Gateway to DBT benefits",
        confidence: 92,
    },
    CatalogEntry {
        id: 402,
        title: "Atal Pension Yojana",
        category: "Financial Inclusion",
        description: "Guaranteed pension scheme.",
        eligibility: "18–40 years citizens",
        documents: &["Aadhaar", "Bank Account"],
        apply_link: "https://npscra.nsdl.co.in",
        source: "PFRDA",
        why_recommended: "Old-age financial security",
        confidence: 85,
    },
    CatalogEntry {
        id: 403,
        title: "Pradhan Mantri Mudra Yojana",
        category: "Financial Inclusion",
        description: "Loans for micro enterprises.",
        eligibility: "Small business owners",
        documents: &["Business Proof", "Aadhaar"],
        apply_link: "https://mudra.org.in",
        source: "MoF",
        why_recommended: "Easy business credit",
        confidence: 88,
    },
    CatalogEntry {
        id: 404,
        title: "Stand-Up India",
        category: "Financial Inclusion",
        description: "Loans for SC/ST and women entrepreneurs.",
        eligibility: "SC/ST/Women entrepreneurs",
        documents: &["Caste Certificate", "Business Plan"],
        apply_link: "https://standupmitra.in",
        source: "MoF",
        why_recommended: "Promotes entrepreneurship",
        confidence: 84,
    },
    CatalogEntry {
        id: 405,
        title: "Direct Benefit Transfer",
        category: "Financial Inclusion",
        description: "Direct transfer of subsidies to bank accounts.",
        eligibility: "Eligible beneficiaries",
        documents: &["Aadhaar", "Bank Account"],
        apply_link: "https://dbtbharat.gov.in",
        source: "GoI",
        why_recommended: "Eliminates middlemen",
        confidence: 90,
    },
    CatalogEntry {
        id: 501,
        title: "Pradhan Mantri Awas Yojana - Urban",
        category: "Housing",
        description: "Affordable housing for urban poor.",
        eligibility: "EWS/LIG/MIG families",
        documents: &["Income Certificate", "Aadhaar"],
        apply_link: "https://pmaymis.gov.in",
        source: "MoHUA",
        why_recommended: "Interest subsidy on loans",
        confidence: 87,
    },
    CatalogEntry {
        id: 502,
        title: "Pradhan Mantri Awas Yojana - Gramin",
        category: "Housing",
        description: "Housing for rural poor.",
        eligibility: "Rural households",
        documents: &["Job Card", "Aadhaar"],
        apply_link: "https://pmayg.nic.in",
        source: "MoRD",
        why_recommended: "Permanent rural housing",
        confidence: 85,
    },
    CatalogEntry {
        id: 503,
        title: "Rajiv Awas Yojana",
        category: "Housing",
        description: "Slum redevelopment scheme.",
        eligibility: "Urban slum dwellers",
        documents: &["Residence Proof"],
        apply_link: "https://mohua.gov.in",
        source: "MoHUA",
        why_recommended: "Slum-free cities",
        confidence: 76,
    },
    CatalogEntry {
        id: 504,
        title: "Affordable Rental Housing Complex",
        category: "Housing",
        description: "Rental housing for migrants.",
        eligibility: "Urban migrants",
        documents: &["Employment Proof"],
        apply_link: "https://mohua.gov.in",
        source: "MoHUA",
        why_recommended: "Affordable rentals",
        confidence: 79,
    },
    CatalogEntry {
        id: 505,
        title: "Credit Linked Subsidy Scheme",
        category: "Housing",
        description: "Interest subsidy on housing loans.",
        eligibility: "EWS/LIG/MIG",
        documents: &["Income Certificate"],
        apply_link: "https://pmaymis.gov.in",
        source: "MoHUA",
        why_recommended: "Lower EMI burden",
        confidence: 83,
    },
    CatalogEntry {
        id: 601,
        title: "Pradhan Mantri Kaushal Vikas Yojana",
        category: "Employment",
        description: "Skill development training for youth.",
        eligibility: "Unemployed youth",
        documents: &["Aadhaar"],
        apply_link: "https://pmkvyofficial.org",
        source: "MSDE",
        why_recommended: "Industry-relevant skills",
        confidence: 84,
    },
    CatalogEntry {
        id: 602,
        title: "MGNREGA",
        category: "Employment",
        description: "100 days guaranteed wage employment.",
        eligibility: "Rural households",
        documents: &["Job Card"],
        apply_link: "https://nrega.nic.in",
        source: "MoRD",
        why_recommended: "Income security",
        confidence: 86,
    },
    CatalogEntry {
        id: 603,
        title: "National Career Service",
        category: "Employment",
        description: "Job matching and career guidance.",
        eligibility: "Job seekers",
        documents: &["Resume"],
        apply_link: "https://www.ncs.gov.in",
        source: "MoLE",
        why_recommended: "Employment opportunities",
        confidence: 78,
    },
    CatalogEntry {
        id: 604,
        title: "Startup India",
        category: "Employment",
        description: "Support for startups.",
        eligibility: "Startup founders",
        documents: &["Incorporation Certificate"],
        apply_link: "https://startupindia.gov.in",
        source: "DPIIT",
        why_recommended: "Entrepreneurship boost",
        confidence: 81,
    },
    CatalogEntry {
        id: 605,
        title: "Deen Dayal Upadhyaya Grameen Kaushalya Yojana",
        category: "Employment",
        description: "Skill training for rural youth.",
        eligibility: "Rural youth",
        documents: &["Aadhaar"],
        apply_link: "https://ddugky.gov.in",
        source: "MoRD",
        why_recommended: "Rural employment",
        confidence: 80,
    },
    CatalogEntry {
        id: 701,
        title: "National Social Assistance Programme",
        category: "Social Welfare",
        description: "Pension for elderly, widows, disabled.",
        eligibility: "Below poverty line citizens",
        documents: &["BPL Card", "Aadhaar"],
        apply_link: "https://nsap.nic.in",
        source: "MoRD",
        why_recommended: "Social security",
        confidence: 82,
    },
    CatalogEntry {
        id: 702,
        title: "Integrated Child Development Services",
        category: "Social Welfare",
        description: "Nutrition and health for children & mothers.",
        eligibility: "Children & pregnant women",
        documents: &["Anganwadi Registration"],
        apply_link: "https://icds-wcd.nic.in",
        source: "MWCD",
        why_recommended: "Child nutrition support",
        confidence: 81,
    },
    CatalogEntry {
        id: 703,
        title: "PM Matru Vandana Yojana",
        category: "Social Welfare",
        description: "Maternity benefit scheme.",
        eligibility: "Pregnant women",
        documents: &["Aadhaar", "Bank Account"],
        apply_link: "https://pmmvy.nic.in",
        source: "MWCD",
        why_recommended: "Maternal health support",
        confidence: 83,
    },
    CatalogEntry {
        id: 704,
        title: "Senior Citizen Welfare Scheme",
        category: "Social Welfare",
        description: "Financial & healthcare support for elderly.",
        eligibility: "Senior citizens",
        documents: &["Age Proof"],
        apply_link: "https://socialjustice.gov.in",
        source: "MoSJE",
        why_recommended: "Elder care support",
        confidence: 78,
    },
    CatalogEntry {
        id: 705,
        title: "Disability Rehabilitation Scheme",
        category: "Social Welfare",
        description: "Rehabilitation services for disabled persons.",
        eligibility: "Persons with disabilities",
        documents: &["Disability Certificate"],
        apply_link: "https://socialjustice.gov.in",
        source: "MoSJE",
        why_recommended: "Inclusive welfare",
        confidence: 80,
    },
];

/// Every catalog scheme, grouped by category in display order.
pub fn schemes() -> Vec<Scheme> {
    CATALOG.iter().map(CatalogEntry::to_scheme).collect()
}

pub fn find(id: u32) -> Option<Scheme> {
    CATALOG
        .iter()
        .find(|entry| entry.id == id)
        .map(CatalogEntry::to_scheme)
}
