mod login;
mod register;
mod verify;
