mod route;
mod sources;
