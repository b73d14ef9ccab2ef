
mod health_check;
mod publication_info;
mod subscribe;
