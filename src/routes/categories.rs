use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{AddCategoryForm, AddCategoryFormPayload};
use crate::notify::ChangeBus;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::categories::{
    add_category as add_category_service, show_categories as show_categories_service,
};

#[get("/categories")]
pub async fn show_categories(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let categories: Vec<CategoryDto> =
                categories.into_iter().map(CategoryDto::from).collect();
            let mut context = base_context(&flash_messages, &user, "categories");
            context.insert("categories", &categories);
            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render categories page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories")]
pub async fn add_category(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    bus: web::Data<ChangeBus>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match add_category_service(payload, repo.get_ref(), bus.get_ref()) {
        Ok(()) => FlashMessage::success("Category added successfully").send(),
        Err(err) => {
            log::error!("Failed to add category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect("/categories")
}
