//! services/api/src/adapters/seed.rs
//!
//! The records every fresh store starts with: the six-course catalog and the
//! admin account.

use course_shop_core::domain::{Course, Role, User};

pub const ADMIN_EMAIL: &str = "admin@email.com";
pub const ADMIN_PASSWORD: &str = "123456";

pub fn admin(password_hash: String) -> User {
    User {
        id: 1,
        name: "Admin".to_string(),
        email: ADMIN_EMAIL.to_string(),
        password_hash,
        role: Role::Admin,
        registered_at: None,
    }
}

pub fn courses() -> Vec<Course> {
    vec![
        course(
            1,
            "JavaScript Completo",
            "Aprenda JavaScript do zero ao avançado",
            97.90,
            "Programação",
            "javascript.png",
            (120, 30, 1540),
        ),
        course(
            2,
            "HTML5 e CSS3",
            "Crie sites profissionais com as melhores práticas",
            79.90,
            "Front-end",
            "html-5.png",
            (80, 20, 2300),
        ),
        course(
            3,
            "React do Zero",
            "Desenvolva aplicações React completas",
            127.90,
            "Framework",
            "react-native.png",
            (100, 25, 890),
        ),
        course(
            4,
            "Node.js API REST",
            "Crie APIs profissionais com Node.js",
            109.90,
            "Back-end",
            "nodejs.png",
            (90, 22, 650),
        ),
        course(
            5,
            "Python para Dados",
            "Análise de dados com Python",
            119.90,
            "Data Science",
            "python.png",
            (110, 28, 780),
        ),
        course(
            6,
            "Banco de Dados SQL",
            "Aprenda SQL do básico ao avançado",
            89.90,
            "Banco de Dados",
            "database.png",
            (70, 18, 920),
        ),
    ]
}

const ICON_BASE_URL: &str = "https://img.icons8.com/color/96/000000/";

// (lessons, hours, students)
fn course(
    id: u32,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    icon: &str,
    (lessons, hours, students): (u32, u32, u32),
) -> Course {
    Course {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image_url: format!("{ICON_BASE_URL}{icon}"),
        lessons,
        hours,
        students,
    }
}
