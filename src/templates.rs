use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{entities::movie, models::EditForm, tmdb::SearchResult};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "Nothing here yet." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for movie in movies {
                            (movie_card(movie))
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &movie::Model, form: &EditForm, error: Option<&str>) -> String {
    page(
        "Edit Movie",
        html! {
            (card(html! {
                h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                p class="mt-2 text-gray-600" { "Edit Movie Rating" }

                @if let Some(error) = error {
                    p class="mt-4 rounded-md bg-red-50 px-3 py-2 text-sm text-red-700" { (error) }
                }

                form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                    div {
                        label class="block text-sm font-medium text-gray-700" for="new_rating" { "Your rating out of 10" }
                        input class=(INPUT_CLASS) name="new_rating" id="new_rating" inputmode="decimal" value=(form.new_rating) required;
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="new_review" { "Your review" }
                        input class=(INPUT_CLASS) name="new_review" id="new_review" value=(form.new_review);
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Done" }
                }
            }))
        },
    )
}

pub fn add_page(error: Option<&str>) -> String {
    page(
        "Add Movie",
        html! {
            (card(html! {
                h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }

                @if let Some(error) = error {
                    p class="mt-4 rounded-md bg-red-50 px-3 py-2 text-sm text-red-700" { (error) }
                }

                form class="mt-8 space-y-6" method="post" action="/select-movie" {
                    div {
                        label class="block text-sm font-medium text-gray-700" for="movie-title" { "Movie Title" }
                        input class=(INPUT_CLASS) name="movie-title" id="movie-title" required;
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                }
            }))
        },
    )
}

pub fn select_page(query: &str, results: &[SearchResult], image_base_url: &str) -> String {
    page(
        "Select Movie",
        html! {
            (card(html! {
                h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }

                @if results.is_empty() {
                    p class="mt-6 text-gray-600" { "No movies found." }
                } @else {
                    ul class="mt-6 divide-y divide-gray-200" {
                        @for result in results {
                            li class="py-3 flex gap-4" {
                                @if let Some(poster) = result.poster_url(image_base_url) {
                                    img class="w-12 rounded" src=(poster) alt=(result.title);
                                }
                                div class="flex-1" {
                                    a class="text-blue-600 hover:text-blue-800" href=(format!("/find-movie?id_json={}", result.id)) {
                                        (result.title)
                                        @if let Some(date) = non_empty(&result.release_date) {
                                            span class="ml-2 text-gray-500" { "- " (date) }
                                        }
                                    }
                                    @if let Some(overview) = non_empty(&result.overview) {
                                        p class="mt-1 text-sm text-gray-600" { (overview) }
                                    }
                                }
                            }
                        }
                    }
                }

                a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
            }))
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            (card(html! {
                h1 class="text-2xl font-bold text-gray-900" { (status.canonical_reason().unwrap_or("Error")) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }))
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn card(inner: Markup) -> Markup {
    html! {
        div class="max-w-xl mx-auto px-6 py-12" {
            div class="bg-white shadow rounded-lg p-8" { (inner) }
        }
    }
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if !movie.img_url.is_empty() {
                img class="w-24 rounded" src=(movie.img_url) alt=(movie.title);
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(ranking) = movie.ranking {
                            span class="mr-2 text-gray-400" { (ranking) "." }
                        }
                        (movie.title)
                        @if let Some(year) = release_year(&movie.year) {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    span class="text-lg font-semibold text-gray-700" {
                        @match movie.rating {
                            Some(rating) => { (format!("{rating:.1}")) },
                            None => { "unrated" },
                        }
                    }
                }
                @if let Some(review) = &movie.review {
                    p class="mt-1 italic text-gray-600" { "\u{201c}" (review) "\u{201d}" }
                }
                p class="mt-2 text-sm text-gray-700" { (movie.description) }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// TMDB release dates are `YYYY-MM-DD`; anything else is shown as stored.
fn release_year(release_date: &str) -> Option<String> {
    if release_date.is_empty() {
        return None;
    }
    match release_date.parse::<jiff::civil::Date>() {
        Ok(date) => Some(date.year().to_string()),
        Err(_) => Some(release_date.to_string()),
    }
}
