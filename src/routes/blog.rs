use std::io::{Read, Seek, SeekFrom};

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::auth::AuthenticatedUser;
use crate::domain::blog::Blog;
use crate::domain::types::BlogId;
use crate::dto::blog::BlogPostDto;
use crate::dto::categories::CategoryDto;
use crate::forms::blog::{
    AddBlogForm, AddBlogFormPayload, EditBlogForm, EditBlogFormPayload, UploadImageForm,
};
use crate::notify::ChangeBus;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::analytics::{blog_metrics, posts_per_day};
use crate::services::blog::{
    add_post as add_post_service, delete_post as delete_post_service,
    publish_post as publish_post_service, show_post as show_post_service,
    show_posts as show_posts_service, update_post as update_post_service,
    upload_image as upload_image_service,
};
use crate::services::categories::show_categories as show_categories_service;
use crate::storage::FileStorage;

fn parse_blog_id(raw: i32) -> Option<BlogId> {
    BlogId::new(raw).ok()
}

/// Console landing page with blog metrics and the recent-posts feed.
#[get("/")]
pub async fn console(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let posts = match show_posts_service(repo.get_ref()) {
        Ok(posts) => posts,
        Err(err) => {
            log::error!("Failed to render console page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    let categories = match show_categories_service(repo.get_ref()) {
        Ok(categories) => categories,
        Err(err) => {
            log::error!("Failed to render console page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let blogs: Vec<Blog> = posts.iter().map(|p| p.blog.clone()).collect();
    let metrics = blog_metrics(&blogs, categories.len());
    let activity = posts_per_day(&blogs);
    let recent: Vec<BlogPostDto> = posts.into_iter().take(5).map(BlogPostDto::from).collect();

    let mut context = base_context(&flash_messages, &user, "console");
    context.insert("metrics", &metrics);
    context.insert("activity", &activity);
    context.insert("recent_posts", &recent);
    render_template(&tera, "main/console.html", &context)
}

#[get("/posts")]
pub async fn show_posts(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_posts_service(repo.get_ref()) {
        Ok(posts) => {
            let posts: Vec<BlogPostDto> = posts.into_iter().map(BlogPostDto::from).collect();
            let mut context = base_context(&flash_messages, &user, "posts");
            context.insert("posts", &posts);
            render_template(&tera, "blog/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render posts page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/posts/add")]
pub async fn add_post_page(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let categories: Vec<CategoryDto> =
                categories.into_iter().map(CategoryDto::from).collect();
            let mut context = base_context(&flash_messages, &user, "posts");
            context.insert("categories", &categories);
            render_template(&tera, "blog/add.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render add post page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/add")]
pub async fn add_post(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    bus: web::Data<ChangeBus>,
    web::Form(form): web::Form<AddBlogForm>,
) -> impl Responder {
    let payload: AddBlogFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/posts/add");
        }
    };
    let published = payload.publish;

    match add_post_service(payload, repo.get_ref(), bus.get_ref()) {
        Ok(_) => {
            if published {
                FlashMessage::success("Blog post published successfully").send();
            } else {
                FlashMessage::success("Blog post saved as draft").send();
            }
            redirect("/posts")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Please select a category").send();
            redirect("/posts/add")
        }
        Err(err) => {
            log::error!("Failed to add post: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/posts/{post_id}")]
pub async fn show_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(id) = parse_blog_id(post_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match show_post_service(id, repo.get_ref()) {
        Ok(post) => {
            let post = BlogPostDto::from(post);
            let mut context = base_context(&flash_messages, &user, "posts");
            context.insert("post", &post);
            render_template(&tera, "blog/view.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render post page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/posts/{post_id}/edit")]
pub async fn edit_post_page(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Some(id) = parse_blog_id(post_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    let post = match show_post_service(id, repo.get_ref()) {
        Ok(post) => BlogPostDto::from(post),
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to render edit post page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    let categories = match show_categories_service(repo.get_ref()) {
        Ok(categories) => categories
            .into_iter()
            .map(CategoryDto::from)
            .collect::<Vec<_>>(),
        Err(err) => {
            log::error!("Failed to render edit post page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, &user, "posts");
    context.insert("post", &post);
    context.insert("categories", &categories);
    render_template(&tera, "blog/edit.html", &context)
}

#[post("/posts/{post_id}/edit")]
pub async fn edit_post(
    post_id: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    bus: web::Data<ChangeBus>,
    web::Form(form): web::Form<EditBlogForm>,
) -> impl Responder {
    let raw_id = post_id.into_inner();
    let Some(id) = parse_blog_id(raw_id) else {
        return HttpResponse::NotFound().finish();
    };

    let payload: EditBlogFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&format!("/posts/{raw_id}/edit"));
        }
    };

    match update_post_service(id, payload, repo.get_ref(), bus.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Blog post updated successfully").send();
            redirect(&format!("/posts/{raw_id}"))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to update post: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/{post_id}/publish")]
pub async fn publish_post(
    post_id: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    bus: web::Data<ChangeBus>,
) -> impl Responder {
    let raw_id = post_id.into_inner();
    let Some(id) = parse_blog_id(raw_id) else {
        return HttpResponse::NotFound().finish();
    };

    match publish_post_service(id, repo.get_ref(), bus.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Blog post published successfully").send();
            redirect(&format!("/posts/{raw_id}"))
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to publish post: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/{post_id}/delete")]
pub async fn delete_post(
    post_id: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    bus: web::Data<ChangeBus>,
) -> impl Responder {
    let Some(id) = parse_blog_id(post_id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match delete_post_service(id, repo.get_ref(), bus.get_ref()) {
        Ok(()) => {
            FlashMessage::success("Blog post deleted successfully").send();
            redirect("/posts")
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete post: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Editor image upload; responds with the JSON shape the rich-text editor
/// expects for inserted images.
#[post("/posts/upload-image")]
pub async fn upload_image(
    _user: AuthenticatedUser,
    storage: web::Data<FileStorage>,
    MultipartForm(mut form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    let file_name = form
        .image
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());

    let file = form.image.file.as_file_mut();
    let mut bytes = Vec::new();
    if file.seek(SeekFrom::Start(0)).is_err() || file.read_to_end(&mut bytes).is_err() {
        log::error!("Failed to read uploaded image");
        return HttpResponse::InternalServerError().finish();
    }

    match upload_image_service(storage.get_ref(), &file_name, &bytes) {
        Ok(url) => HttpResponse::Ok().json(serde_json::json!({ "location": url })),
        Err(err) => {
            log::error!("Failed to store uploaded image: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
