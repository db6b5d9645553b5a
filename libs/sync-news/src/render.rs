use entity::prelude::*;
use htmlescape::encode_minimal;
use strum::IntoEnumIterator;

use crate::document::{Document, Row, UpdateForm, CREATE_VIEW, HEADER};

const STYLE: &str = "\
.fade-out { opacity: 0; transition: opacity 0.5s ease-out; }
.addListMain { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); }
.form-container { background: #fff; margin: 5% auto; padding: 20px; width: 50%; }";

/// The whole page for the document's current view, with the update form
/// overlaid when it is open.
pub fn render_page(document: &Document) -> String {
    let main = if document.location() == CREATE_VIEW {
        render_create_form(&NewsForm::default())
    } else {
        render_table(document)
    };

    let overlay = document
        .update_form()
        .map(render_update_form)
        .unwrap_or_default();

    wrap_page(&main, &overlay)
}

/// The create view re-rendered with what the user already typed.
pub fn render_create_page(values: &NewsForm) -> String {
    wrap_page(&render_create_form(values), "")
}

fn wrap_page(main: &str, overlay: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>News</title>\n<style>\n{}\n</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">News</a> <a href=\"/add\">Add news</a></nav>\n\
         {}\n{}</body>\n</html>\n",
        STYLE, main, overlay
    )
}

pub fn render_table(document: &Document) -> String {
    let header = HEADER
        .iter()
        .map(|title| format!("<th>{}</th>", title))
        .collect::<Vec<String>>()
        .join("");

    let rows = document
        .rows()
        .iter()
        .map(render_row)
        .collect::<Vec<String>>()
        .join("\n");

    format!("<table>\n<tr>{}</tr>\n{}\n</table>", header, rows)
}

fn render_row(row: &Row) -> String {
    let id = row.id.to_string();
    let class = if row.fading { " class=\"fade-out\"" } else { "" };

    format!(
        "<tr{class} data-id=\"{id}\">\
         <td>{id}</td>\
         <td>{title}</td>\
         <td>{category}</td>\
         <td>{likes}</td>\
         <td>{updated}</td>\
         <td>{created}</td>\
         <td style=\"display: flex; justify-content: space-between; align-items: center;\">\
         <form method=\"post\" action=\"/news/{id}/delete\">\
         <button class=\"delete-button\" data-id=\"{id}\">Delete</button></form>\
         <form method=\"get\" action=\"/news/{id}/edit\">\
         <button class=\"update-button\" data-id=\"{id}\">Update</button></form>\
         </td></tr>",
        class = class,
        id = encode_minimal(&id),
        title = encode_minimal(&row.title),
        category = encode_minimal(&row.category),
        likes = row.likes,
        updated = encode_minimal(&row.date_updated),
        created = encode_minimal(&row.date_created),
    )
}

pub fn render_update_form(form: &UpdateForm) -> String {
    let id = encode_minimal(&form.id.to_string());

    format!(
        "<div class=\"addListMain\">\n<div class=\"form-container\">\n\
         <h1>Update News</h1>\n\
         <form id=\"update-form\" method=\"post\" action=\"/news/{id}/edit\" data-id=\"{id}\">\n\
         {fields}\
         <div class=\"form-group\" style=\"justify-content: right; display: flex; gap: 15px; margin-top: 15px;\">\n\
         <button type=\"submit\" class=\"cancel-update\" formaction=\"/news/edit/cancel\" formnovalidate>Cancel</button>\n\
         <button type=\"submit\" class=\"saveBtn\">Update</button>\n\
         </div>\n</form>\n</div>\n</div>\n",
        id = id,
        fields = render_fields("update-", &form.values),
    )
}

pub fn render_create_form(values: &NewsForm) -> String {
    format!(
        "<div class=\"form-container\">\n<h1>Add News</h1>\n\
         <form id=\"create-form\" method=\"post\" action=\"/add\">\n\
         {fields}\
         <div class=\"form-group\">\n\
         <button type=\"submit\" class=\"saveBtn\">Save</button>\n\
         </div>\n</form>\n</div>\n",
        fields = render_fields("", values),
    )
}

fn render_fields(prefix: &str, values: &NewsForm) -> String {
    format!(
        "<div class=\"form-group\">\n\
         <label for=\"{p}title\">Title</label>\n\
         <input type=\"text\" id=\"{p}title\" name=\"title\" value=\"{title}\" required>\n\
         </div>\n\
         <div class=\"form-group\">\n\
         <label for=\"{p}description\">Description</label>\n\
         <textarea id=\"{p}description\" name=\"description\" rows=\"4\" required>{description}</textarea>\n\
         </div>\n\
         <div class=\"form-group\">\n\
         <label for=\"{p}category\">Category</label>\n\
         <select id=\"{p}category\" name=\"category\" required>\n\
         <option value=\"\">Select a category</option>\n\
         {options}\
         </select>\n\
         </div>\n\
         <div class=\"editor\">\n\
         <div class=\"firstNameDiv\">\n\
         <label for=\"{p}editorFirstname\">Editor First Name</label>\n\
         <input type=\"text\" id=\"{p}editorFirstname\" name=\"editorFirstname\" value=\"{first}\" required>\n\
         </div>\n\
         <div class=\"lastNameDiv\">\n\
         <label for=\"{p}editorLastname\">Editor Last Name</label>\n\
         <input type=\"text\" id=\"{p}editorLastname\" name=\"editorLastname\" value=\"{last}\" required>\n\
         </div>\n\
         </div>\n",
        p = prefix,
        title = encode_minimal(&values.title),
        description = encode_minimal(&values.description),
        options = render_category_options(&values.category),
        first = encode_minimal(&values.editor_first_name),
        last = encode_minimal(&values.editor_last_name),
    )
}

fn render_category_options(selected: &str) -> String {
    Category::iter()
        .map(|category| {
            let name = category.as_ref();
            let marker = if name == selected { " selected" } else { "" };
            format!("<option value=\"{0}\"{1}>{0}</option>\n", name, marker)
        })
        .collect::<Vec<String>>()
        .join("")
}
