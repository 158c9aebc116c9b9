use serde::Deserialize;

/// `POST /login` form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /signup` form body. Profile fields are optional.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
